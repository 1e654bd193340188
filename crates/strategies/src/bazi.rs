use crate::Strategy;
use crate::error::StrategyError;
use configuration::{BaZiParams, HyperParameters};
use core_types::{Kline, OrderSide, Polarity, Signal};
use divination::bazi_polarity;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use ta::Next;
use ta::indicators::MovingAverageConvergenceDivergence as Macd;

const MACD_FAST: usize = 12;
const MACD_SLOW: usize = 26;
const MACD_SIGNAL: usize = 9;

/// Candles fed to the MACD before its histogram is trusted.
pub const WARM_UP: usize = MACD_SLOW + MACD_SIGNAL - 1;

#[derive(Debug, Clone, Copy)]
struct PillarGate {
    shift_hour: u32,
    period: usize,
}

/// Trades the five-element balance of the coming days, confirmed by MACD momentum.
pub struct BaZi {
    symbol: String,
    macd: Macd,
    /// Candles seen so far, capped at `WARM_UP`.
    seen: usize,
    gate: Option<PillarGate>,
}

impl BaZi {
    pub fn new(params: BaZiParams, symbol: String) -> Result<Self, StrategyError> {
        params.validate()?;
        let macd = Macd::new(MACD_FAST, MACD_SLOW, MACD_SIGNAL)
            .map_err(|e| StrategyError::IndicatorError(format!("MACD: {:?}", e)))?;
        let gate = (params.enable_bazi_signal == 1).then_some(PillarGate {
            shift_hour: params.bazi_signal_shift_hour as u32,
            period: params.bazi_signal_trend_period as usize,
        });
        Ok(Self { symbol, macd, seen: 0, gate })
    }

    fn decide(&self, polarity: Option<Polarity>, histogram: f64) -> Option<OrderSide> {
        let bullish = polarity.is_none_or(|p| p == Polarity::Bullish);
        let bearish = polarity.is_none_or(|p| p == Polarity::Bearish);
        if bullish && histogram > 0.0 {
            Some(OrderSide::Buy)
        } else if bearish && histogram < 0.0 {
            Some(OrderSide::Sell)
        } else {
            None
        }
    }
}

impl Strategy for BaZi {
    fn evaluate(&mut self, kline: &Kline) -> Result<Option<Signal>, StrategyError> {
        // The `ta` crate uses `f64`. We must convert from our high-precision `Decimal`.
        let close = kline
            .close
            .to_f64()
            .ok_or_else(|| StrategyError::IndicatorError(format!("close {} is not representable", kline.close)))?;
        let histogram = self.macd.next(close).histogram;

        self.seen = (self.seen + 1).min(WARM_UP);
        if self.seen < WARM_UP {
            return Ok(None);
        }

        let polarity = self
            .gate
            .map(|gate| bazi_polarity(kline.open_time, gate.shift_hour, gate.period));
        tracing::debug!(symbol = %self.symbol, ?polarity, histogram, "BaZi: evaluated day pillars");

        let signal = self
            .decide(polarity, histogram)
            .map(|side| Signal::new(&self.symbol, side, kline.close_time, dec!(1.0)));
        if let Some(signal) = &signal {
            tracing::info!(symbol = %self.symbol, side = ?signal.side, at = %signal.timestamp, "BaZi: signal");
        }
        Ok(signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::trending;
    use chrono::{TimeZone, Utc};

    fn params(enable_bazi_signal: i64) -> BaZiParams {
        BaZiParams {
            enable_bazi_signal,
            bazi_signal_shift_hour: 12,
            bazi_signal_trend_period: 1,
            ..BaZiParams::default()
        }
    }

    fn last_signal(strategy: &mut BaZi, klines: &[Kline]) -> Option<Signal> {
        let mut last = None;
        for (i, kline) in klines.iter().enumerate() {
            last = strategy.evaluate(kline).unwrap();
            if i + 1 < WARM_UP {
                assert!(last.is_none());
            }
        }
        last
    }

    #[test]
    fn test_histogram_alone_without_gate() {
        let end = Utc.with_ymd_and_hms(2000, 1, 1, 20, 0, 0).unwrap();
        let mut strategy = BaZi::new(params(0), "BTCUSDT".to_string()).unwrap();
        assert_eq!(last_signal(&mut strategy, &trending(end, 40, dec!(1))).unwrap().side, OrderSide::Buy);

        let mut strategy = BaZi::new(params(0), "BTCUSDT".to_string()).unwrap();
        assert_eq!(last_signal(&mut strategy, &trending(end, 40, dec!(-1))).unwrap().side, OrderSide::Sell);
    }

    #[test]
    fn test_first_signal_on_the_warm_up_candle() {
        let end = Utc.with_ymd_and_hms(2000, 1, 1, 20, 0, 0).unwrap();
        let klines = trending(end, WARM_UP + 3, dec!(1));
        let mut strategy = BaZi::new(params(0), "BTCUSDT".to_string()).unwrap();
        let signals: Vec<Option<Signal>> = klines.iter().map(|k| strategy.evaluate(k).unwrap()).collect();
        assert!(signals[..WARM_UP - 1].iter().all(Option::is_none));
        // The counter stays warm after it saturates.
        assert!(signals[WARM_UP - 1..].iter().all(|s| s.as_ref().is_some_and(|s| s.side == OrderSide::Buy)));
    }

    #[test]
    fn test_bullish_days_only_buy() {
        // Evening of 2000-01-01 reads 2000-01-02, a Ji-Wei (earth, earth) day.
        let end = Utc.with_ymd_and_hms(2000, 1, 1, 20, 0, 0).unwrap();
        let mut strategy = BaZi::new(params(1), "BTCUSDT".to_string()).unwrap();
        assert_eq!(last_signal(&mut strategy, &trending(end, 40, dec!(1))).unwrap().side, OrderSide::Buy);

        let mut strategy = BaZi::new(params(1), "BTCUSDT".to_string()).unwrap();
        assert!(last_signal(&mut strategy, &trending(end, 40, dec!(-1))).is_none());
    }

    #[test]
    fn test_bearish_days_only_sell() {
        // Evening of 2000-02-17 reads 2000-02-18, a Bing-Wu (fire, fire) day.
        let end = Utc.with_ymd_and_hms(2000, 2, 17, 20, 0, 0).unwrap();
        let mut strategy = BaZi::new(params(1), "BTCUSDT".to_string()).unwrap();
        assert_eq!(last_signal(&mut strategy, &trending(end, 40, dec!(-1))).unwrap().side, OrderSide::Sell);

        let mut strategy = BaZi::new(params(1), "BTCUSDT".to_string()).unwrap();
        assert!(last_signal(&mut strategy, &trending(end, 40, dec!(1))).is_none());
    }
}
