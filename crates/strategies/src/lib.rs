//! # Geomancer Strategy Library
//!
//! This crate turns divination readings into trade signals. It defines a universal
//! `Strategy` trait, the three divination strategies built on it and an astro-gated
//! moving average crossover.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no knowledge of files, exchanges or execution. It depends only on
//!   `core-types`, `configuration` and `divination`.
//! - **Strategy agnostic drivers:** by using the `Strategy` trait, the `replay` crate can
//!   run any strategy without knowing its internal details.
//! - **Per-run state:** each strategy owns its candle window or indicator state; nothing is shared
//!   between instances.
//!
//! ## Public API
//!
//! - `Strategy`: The core trait all strategies implement.
//! - `StrategyId`: A simple enum to identify which strategy to create.
//! - `create_strategy`: The factory function to construct a strategy instance.
//! - The concrete strategy structs themselves (`Geomancy`, `IChing`, `BaZi`, `AstroMa`).

// Declare all the modules that constitute this crate.
pub mod astro_ma;
pub mod bazi;
pub mod error;
pub mod factory;
pub mod geomancy;
pub mod history;
pub mod iching;

// Re-export the key components to create a clean, public-facing API.
pub use astro_ma::AstroMa;
pub use bazi::BaZi;
pub use error::StrategyError;
pub use factory::create_strategy;
pub use geomancy::Geomancy;
pub use history::CandleHistory;
pub use iching::IChing;

// Re-export StrategyId from core_types
pub use core_types::enums::StrategyId;

use core_types::{Kline, Signal};

/// The core trait that all trading strategies must implement.
///
/// The `&mut self` in `evaluate` is crucial, as every strategy keeps its own rolling
/// candle buffer. The `Send + Sync` bounds allow strategies to be replayed on worker
/// threads.
pub trait Strategy: Send + Sync {
    /// Evaluates the strategy based on a new Kline bar.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Signal))` - if the reading calls for a position.
    /// * `Ok(None)` - during warm-up, or when the reading is neutral or gated out.
    /// * `Err(StrategyError)` - if the window could not be read (missing data, or a
    ///   symbol with no figure).
    fn evaluate(&mut self, kline: &Kline) -> Result<Option<Signal>, StrategyError>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use core_types::Kline;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    pub fn kline_at(hour: i64, open: Decimal, close: Decimal) -> Kline {
        let open_time = Utc.with_ymd_and_hms(2022, 5, 1, 0, 0, 0).unwrap() + Duration::hours(hour);
        kline_from(open_time, open, close)
    }

    fn kline_from(open_time: DateTime<Utc>, open: Decimal, close: Decimal) -> Kline {
        Kline {
            open_time,
            open,
            high: open.max(close) + dec!(1),
            low: open.min(close) - dec!(1),
            close,
            volume: dec!(5),
            close_time: open_time + Duration::hours(1),
            interval: "1h".to_string(),
        }
    }

    /// Hourly candles from 2022-05-01: 1 is a rising candle, 0 a falling one.
    pub fn colored(colors: &[u8]) -> Vec<Kline> {
        colors
            .iter()
            .enumerate()
            .map(|(i, c)| match c {
                0 => kline_at(i as i64, dec!(101), dec!(100)),
                _ => kline_at(i as i64, dec!(100), dec!(101)),
            })
            .collect()
    }

    pub fn closes(values: &[i64]) -> Vec<Kline> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| kline_at(i as i64, Decimal::from(*v), Decimal::from(*v)))
            .collect()
    }

    /// `count` hourly candles whose last one opens at `end`, closing `step` apart from 100.
    pub fn trending(end: DateTime<Utc>, count: usize, step: Decimal) -> Vec<Kline> {
        (0..count)
            .map(|i| {
                let open_time = end - Duration::hours((count - 1 - i) as i64);
                let close = dec!(100) + step * Decimal::from(i);
                kline_from(open_time, close - step, close)
            })
            .collect()
    }
}
