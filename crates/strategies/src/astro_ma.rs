use crate::Strategy;
use crate::error::StrategyError;
use chrono::NaiveDate;
use configuration::{AstroMaParams, HyperParameters};
use core_types::{Kline, OrderSide, Signal};
use divination::{AstroAction, DailyCalendar, astro_consensus};
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use ta::Next;
use ta::indicators::SimpleMovingAverage as Sma;

#[derive(Debug, Clone, Copy)]
struct AstroGate {
    shift_hour: u32,
    period: usize,
}

/// A fast/slow moving average crossover whose entries must agree with the astro calendar.
///
/// A bullish cross opens long on a "buy" consensus and a bearish cross opens short on a
/// "sell" consensus. With the gate off, every cross is traded.
pub struct AstroMa {
    symbol: String,
    ma_fast: Sma,
    ma_slow: Sma,
    slow_period: usize,
    /// Candles seen so far, capped at the slow period.
    seen: usize,
    // State: the previous fast and slow averages, to detect a crossover event.
    prev_fast_ma: Option<f64>,
    prev_slow_ma: Option<f64>,
    max_day_attempts: u32,
    /// Entries taken on each candle day.
    attempts: HashMap<NaiveDate, u32>,
    gate: Option<AstroGate>,
    calendar: DailyCalendar<AstroAction>,
}

impl AstroMa {
    pub fn new(params: AstroMaParams, symbol: String, astro: Option<DailyCalendar<AstroAction>>) -> Result<Self, StrategyError> {
        params.validate()?;
        if params.fast_ma_period >= params.slow_ma_period {
            return Err(StrategyError::InvalidParameters(
                "Fast MA period must be less than Slow MA period".to_string(),
            ));
        }

        let gate = (params.enable_astro_signal == 1).then_some(AstroGate {
            shift_hour: params.astro_signal_shift_hour as u32,
            period: params.astro_signal_trend_period as usize,
        });
        let calendar = match (gate, astro) {
            (Some(_), None) => {
                return Err(StrategyError::InvalidParameters(
                    "AstroMa with `enable_astro_signal = 1` requires an astro calendar".to_string(),
                ));
            }
            (_, astro) => astro.unwrap_or_default(),
        };

        let slow_period = params.slow_ma_period as usize;
        Ok(Self {
            symbol,
            ma_fast: sma(params.fast_ma_period as usize)?,
            ma_slow: sma(slow_period)?,
            slow_period,
            seen: 0,
            prev_fast_ma: None,
            prev_slow_ma: None,
            max_day_attempts: params.max_day_attempts as u32,
            attempts: HashMap::new(),
            gate,
            calendar,
        })
    }

    /// The side of a crossover that the calendar lets through.
    fn confirm(&self, cross: OrderSide, kline: &Kline) -> Option<OrderSide> {
        let Some(gate) = self.gate else {
            return Some(cross);
        };
        match (astro_consensus(&self.calendar, kline.open_time, gate.shift_hour, gate.period), cross) {
            (AstroAction::Buy, OrderSide::Buy) => Some(OrderSide::Buy),
            (AstroAction::Sell, OrderSide::Sell) => Some(OrderSide::Sell),
            _ => None,
        }
    }
}

fn sma(period: usize) -> Result<Sma, StrategyError> {
    Sma::new(period).map_err(|e| StrategyError::IndicatorError(format!("SMA({}): {:?}", period, e)))
}

impl Strategy for AstroMa {
    fn evaluate(&mut self, kline: &Kline) -> Result<Option<Signal>, StrategyError> {
        // The `ta` crate uses `f64`. We must convert from our high-precision `Decimal`.
        let close = kline
            .close
            .to_f64()
            .ok_or_else(|| StrategyError::IndicatorError(format!("close {} is not representable", kline.close)))?;
        let fast = self.ma_fast.next(close);
        let slow = self.ma_slow.next(close);

        // Averages over a partial window are not compared.
        self.seen = (self.seen + 1).min(self.slow_period);
        if self.seen < self.slow_period {
            return Ok(None);
        }
        let previous = self.prev_fast_ma.zip(self.prev_slow_ma);
        self.prev_fast_ma = Some(fast);
        self.prev_slow_ma = Some(slow);
        let Some((prev_fast, prev_slow)) = previous else {
            return Ok(None);
        };

        let cross = if prev_fast <= prev_slow && fast > slow {
            Some(OrderSide::Buy)
        } else if prev_fast >= prev_slow && fast < slow {
            Some(OrderSide::Sell)
        } else {
            None
        };
        tracing::debug!(symbol = %self.symbol, fast, slow, ?cross, "AstroMa: evaluated averages");

        let day = kline.open_time.date_naive();
        // Candles arrive in order, so earlier days can no longer be entered.
        self.attempts.retain(|seen_day, _| *seen_day >= day);
        let taken = *self.attempts.entry(day).or_insert(0);
        if taken >= self.max_day_attempts {
            return Ok(None);
        }

        let Some(side) = cross.and_then(|cross| self.confirm(cross, kline)) else {
            return Ok(None);
        };
        *self.attempts.entry(day).or_insert(0) += 1;

        let signal = Signal::new(&self.symbol, side, kline.close_time, dec!(1.0));
        tracing::info!(symbol = %self.symbol, side = ?signal.side, at = %signal.timestamp, "AstroMa: signal");
        Ok(Some(signal))
    }
}
