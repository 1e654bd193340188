use crate::Strategy;
use crate::error::StrategyError;
use crate::history::CandleHistory;
use configuration::{HyperParameters, IChingParams};
use core_types::{Direction, Kline, OrderSide, Signal, SymbolMethod};
use divination::iching::READING_LINES;
use divination::{AstroAction, DailyCalendar, IChingReading, astro_consensus};
use rust_decimal_macros::dec;

/// Settings of the calendar gate, taken from the hyperparameters.
#[derive(Debug, Clone, Copy)]
struct AstroGate {
    shift_hour: u32,
    period: usize,
}

/// Reads an I-Ching hexagram from the newest candles, optionally confirmed by a daily
/// astro calendar.
pub struct IChing {
    symbol: String,
    method: SymbolMethod,
    history: CandleHistory,
    gate: Option<AstroGate>,
    calendar: DailyCalendar<AstroAction>,
}

impl IChing {
    pub fn new(params: IChingParams, symbol: String, astro: Option<DailyCalendar<AstroAction>>) -> Result<Self, StrategyError> {
        params.validate()?;
        let method = SymbolMethod::from_iching_code(params.symbol_method)?;

        let gate = (params.enable_astro_signal == 1).then_some(AstroGate {
            shift_hour: params.astro_signal_shift_hour as u32,
            period: params.astro_signal_trend_period as usize,
        });
        let calendar = match (gate, astro) {
            (Some(_), None) => {
                return Err(StrategyError::InvalidParameters(
                    "IChing with `enable_astro_signal = 1` requires an astro calendar".to_string(),
                ));
            }
            (_, astro) => astro.unwrap_or_default(),
        };

        Ok(Self {
            symbol,
            method,
            history: CandleHistory::new(method.klines_for(READING_LINES)),
            gate,
            calendar,
        })
    }

    /// The side to open for a reading at `kline`, if any.
    fn decide(&self, reading: &IChingReading, kline: &Kline) -> Option<OrderSide> {
        let Some(gate) = self.gate else {
            return reading.direction.side();
        };
        // With the gate on, only a long reading opens a position; the calendar picks the side.
        if reading.direction != Direction::Long {
            return None;
        }
        match astro_consensus(&self.calendar, kline.open_time, gate.shift_hour, gate.period) {
            AstroAction::Buy => Some(OrderSide::Buy),
            AstroAction::Sell => Some(OrderSide::Sell),
            AstroAction::Neutral => None,
        }
    }
}

impl Strategy for IChing {
    fn evaluate(&mut self, kline: &Kline) -> Result<Option<Signal>, StrategyError> {
        self.history.push(kline.clone());
        if !self.history.is_warm() {
            return Ok(None);
        }

        let reading = IChingReading::read(self.method, self.history.window())?;
        tracing::debug!(
            symbol = %self.symbol,
            hexagram = %reading.hexagram,
            number = reading.hexagram.king_wen_number(),
            direction = %reading.direction,
            "IChing: evaluated reading"
        );

        let signal = self
            .decide(&reading, kline)
            .map(|side| Signal::new(&self.symbol, side, kline.close_time, dec!(1.0)));
        if let Some(signal) = &signal {
            tracing::info!(symbol = %self.symbol, side = ?signal.side, at = %signal.timestamp, "IChing: signal");
        }
        Ok(signal)
    }
}
