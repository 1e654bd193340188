use crate::Strategy;
use crate::error::StrategyError;
use crate::history::CandleHistory;
use configuration::{GeomancyParams, HyperParameters};
use core_types::{Kline, Signal, SymbolMethod};
use divination::geomancy::{self, CHART_LINES};
use rust_decimal_macros::dec;

/// Casts a geomantic shield chart over the newest candles and trades its money reading.
pub struct Geomancy {
    symbol: String,
    method: SymbolMethod,
    history: CandleHistory,
}

impl Geomancy {
    pub fn new(params: GeomancyParams, symbol: String) -> Result<Self, StrategyError> {
        params.validate()?;
        let method = SymbolMethod::from_geomancy_code(params.symbol_method)?;
        Ok(Self {
            symbol,
            method,
            history: CandleHistory::new(method.klines_for(CHART_LINES)),
        })
    }

    pub fn method(&self) -> SymbolMethod {
        self.method
    }
}

impl Strategy for Geomancy {
    /// Emits a buy on a long reading and a sell on a short one.
    ///
    /// Nothing is emitted until sixteen lines can be generated.
    fn evaluate(&mut self, kline: &Kline) -> Result<Option<Signal>, StrategyError> {
        self.history.push(kline.clone());
        if !self.history.is_warm() {
            return Ok(None);
        }

        let (chart, decision) = geomancy::divine(self.method, self.history.window())?;
        tracing::debug!(
            symbol = %self.symbol,
            part_of_fortune = chart.part_of_fortune,
            fortune = %decision.fortune,
            source = ?decision.source,
            direction = %decision.direction,
            "Geomancy: evaluated chart"
        );

        let signal = decision
            .direction
            .side()
            .map(|side| Signal::new(&self.symbol, side, kline.close_time, dec!(1.0)));
        if let Some(signal) = &signal {
            tracing::info!(symbol = %self.symbol, side = ?signal.side, at = %signal.timestamp, "Geomancy: signal");
        }
        Ok(signal)
    }
}
