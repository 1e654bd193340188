use crate::Strategy;
use crate::astro_ma::AstroMa;
use crate::bazi::BaZi;
use crate::error::StrategyError;
use crate::geomancy::Geomancy;
use crate::iching::IChing;
use configuration::Config;
use core_types::enums::StrategyId;
use divination::{AstroAction, DailyCalendar};

/// Creates a new strategy instance based on the provided ID and configuration.
///
/// `astro` is only read by the I-Ching and AstroMa strategies, and only required when
/// their astro gate is enabled.
pub fn create_strategy(
    id: StrategyId,
    config: &Config,
    symbol: &str,
    astro: Option<DailyCalendar<AstroAction>>,
) -> Result<Box<dyn Strategy>, StrategyError> {
    // The compiler will error if a new StrategyId is added but not handled here.
    match id {
        StrategyId::Geomancy => {
            let params = config.strategies.geomancy.clone();
            Ok(Box::new(Geomancy::new(params, symbol.to_string())?))
        }
        StrategyId::IChing => {
            let params = config.strategies.iching.clone();
            Ok(Box::new(IChing::new(params, symbol.to_string(), astro)?))
        }
        StrategyId::BaZi => {
            let params = config.strategies.bazi.clone();
            Ok(Box::new(BaZi::new(params, symbol.to_string())?))
        }
        StrategyId::AstroMa => {
            let params = config.strategies.astro_ma.clone();
            Ok(Box::new(AstroMa::new(params, symbol.to_string(), astro)?))
        }
    }
}
