use crate::error::ConfigError;
use crate::hyperparameters::{HyperParameters, hyperparameters};
use core_types::StrategyId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub strategies: Strategies,
}

impl Config {
    /// Checks every strategy section against its declared ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.strategies.geomancy.validate()?;
        self.strategies.iching.validate()?;
        self.strategies.bazi.validate()?;
        self.strategies.astro_ma.validate()?;
        Ok(())
    }
}

/// Where and how verbosely to log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive used when `RUST_LOG` is not set (e.g. "info" or "strategies=debug").
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "geomancer.log".to_string(),
        }
    }
}

/// Contains the parameter sets for all available strategies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strategies {
    pub geomancy: GeomancyParams,
    pub iching: IChingParams,
    pub bazi: BaZiParams,
    pub astro_ma: AstroMaParams,
}

impl Strategies {
    pub fn params(&self, id: StrategyId) -> &dyn HyperParameters {
        match id {
            StrategyId::Geomancy => &self.geomancy,
            StrategyId::IChing => &self.iching,
            StrategyId::BaZi => &self.bazi,
            StrategyId::AstroMa => &self.astro_ma,
        }
    }

    pub fn params_mut(&mut self, id: StrategyId) -> &mut dyn HyperParameters {
        match id {
            StrategyId::Geomancy => &mut self.geomancy,
            StrategyId::IChing => &mut self.iching,
            StrategyId::BaZi => &mut self.bazi,
            StrategyId::AstroMa => &mut self.astro_ma,
        }
    }
}

// The ATR, Donchian and risk values are carried for the host's order placement; the
// signal logic only reads the symbol method and the calendar gate settings.

hyperparameters! {
    /// Parameters for the geomantic chart strategy.
    pub struct GeomancyParams {
        entry_stop_atr_rate: Decimal [Float, 0.02, 1.5] = 0.1,
        stop_loss_atr_rate: Decimal [Float, 1, 4] = 1.8,
        take_profit_atr_rate: i64 [Int, 1, 15] = 10,
        entry_atr_period: i64 [Int, 2, 50] = 14,
        stop_atr_period: i64 [Int, 2, 50] = 28,
        take_profit_atr_period: i64 [Int, 2, 50] = 28,
        stop_dc_period: i64 [Int, 2, 50] = 14,
        risk: i64 [Int, 1, 10] = 6,
        /// 0 = candle colour, 1 = close price digit sum.
        symbol_method: i64 [Int, 0, 1] = 0,
    }
}

hyperparameters! {
    /// Parameters for the I-Ching reading strategy with its astro gate.
    pub struct IChingParams {
        entry_atr_period: i64 [Int, 10, 50] = 38,
        entry_stop_atr_rate: Decimal [Float, 0.1, 1] = 0.168354,
        stop_atr_period: i64 [Int, 10, 50] = 28,
        stop_loss_atr_rate: Decimal [Float, 1, 5] = 4.74684,
        trailing_stop_atr_rate: Decimal [Float, 1, 20] = 14.4684,
        take_profit_atr_period: i64 [Int, 10, 50] = 32,
        take_profit_atr_rate: i64 [Int, 2, 10] = 2,
        max_day_attempts: i64 [Int, 1, 5] = 4,
        /// Number of calendar days that must agree.
        astro_signal_trend_period: i64 [Int, 1, 5] = 2,
        /// From this hour (UTC) on, the calendar is read from the next day.
        astro_signal_shift_hour: i64 [Int, 0, 23] = 4,
        enable_astro_signal: i64 [Int, 0, 1] = 1,
        /// 0 = colour, 1 = returns, 2 = log returns, 3 = price.
        symbol_method: i64 [Int, 0, 3] = 0,
    }
}

hyperparameters! {
    /// Parameters for the Ba Zi five-element strategy.
    pub struct BaZiParams {
        entry_stop_atr_rate: Decimal [Float, 0.02, 1.5] = 0.3,
        stop_loss_atr_rate: Decimal [Float, 1, 4] = 1.7,
        take_profit_atr_rate: i64 [Int, 1, 15] = 10,
        entry_atr_period: i64 [Int, 2, 50] = 28,
        stop_atr_period: i64 [Int, 5, 50] = 5,
        take_profit_atr_period: i64 [Int, 5, 50] = 20,
        stop_dc_period: i64 [Int, 10, 50] = 41,
        bazi_signal_trend_period: i64 [Int, 1, 5] = 2,
        bazi_signal_shift_hour: i64 [Int, 0, 23] = 0,
        enable_bazi_signal: i64 [Int, 0, 1] = 1,
    }
}

hyperparameters! {
    /// Parameters for the moving average crossover gated by the astro calendar.
    pub struct AstroMaParams {
        entry_stop_atr_rate: Decimal [Float, 0.1, 1] = 0.1,
        stop_loss_atr_rate: Decimal [Float, 1, 4] = 2,
        take_profit: i64 [Int, 1, 20] = 5,
        atr_period: i64 [Int, 5, 40] = 30,
        entry_atr_period: i64 [Int, 5, 40] = 15,
        atr_take_profit_period: i64 [Int, 7, 21] = 10,
        fast_ma_period: i64 [Int, 20, 40] = 30,
        slow_ma_period: i64 [Int, 40, 80] = 60,
        /// Entries allowed per calendar day of the candle.
        max_day_attempts: i64 [Int, 1, 3] = 1,
        astro_signal_trend_period: i64 [Int, 1, 5] = 1,
        astro_signal_shift_hour: i64 [Int, 0, 23] = 0,
        enable_astro_signal: i64 [Int, 0, 1] = 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_match_declarations_and_validate() {
        let config = Config::default();
        config.validate().unwrap();

        for id in [StrategyId::Geomancy, StrategyId::IChing, StrategyId::BaZi, StrategyId::AstroMa] {
            let params = config.strategies.params(id);
            let values = params.values();
            assert_eq!(values.len(), params.declared().len());
            for ((name, value), declared) in values.iter().zip(params.declared()) {
                assert_eq!(*name, declared.name);
                assert_eq!(*value, declared.default, "default of {}", name);
            }
        }
    }

    #[test]
    fn test_set_checks_range_and_kind() {
        let mut strategies = Strategies::default();
        let iching = strategies.params_mut(StrategyId::IChing);
        iching.set("symbol_method", dec!(2)).unwrap();
        assert!(iching.set("symbol_method", dec!(4)).is_err());
        assert!(iching.set("max_day_attempts", dec!(2.5)).is_err());
        assert!(iching.set("no_such_parameter", dec!(1)).is_err());
        iching.set("stop_loss_atr_rate", dec!(2.25)).unwrap();
        assert_eq!(strategies.iching.symbol_method, 2);
        assert_eq!(strategies.iching.stop_loss_atr_rate, dec!(2.25));
    }

    #[test]
    fn test_out_of_range_value_fails_validation() {
        let mut config = Config::default();
        config.strategies.bazi.bazi_signal_shift_hour = 24;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }
}
