use divination::DivinationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Strategy received invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("An error occurred during indicator calculation: {0}")]
    IndicatorError(String),

    #[error("Divination failed: {0}")]
    Divination(#[from] DivinationError),

    #[error("Strategy of type '{0}' not found or implemented")]
    StrategyNotFound(String),
}

impl From<configuration::error::ConfigError> for StrategyError {
    fn from(err: configuration::error::ConfigError) -> Self {
        StrategyError::InvalidParameters(err.to_string())
    }
}

impl From<core_types::CoreError> for StrategyError {
    fn from(err: core_types::CoreError) -> Self {
        StrategyError::InvalidParameters(err.to_string())
    }
}
