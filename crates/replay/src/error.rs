use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Strategy execution error: {0}")]
    Strategy(#[from] strategies::StrategyError),

    #[error("Invalid input data: {0}")]
    Data(String),

    #[error("Failed to read CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to open input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Progress bar template error: {0}")]
    ProgressBarTemplate(String),

    #[error("No candles to replay.")]
    DataUnavailable,
}

impl From<indicatif::style::TemplateError> for ReplayError {
    fn from(error: indicatif::style::TemplateError) -> Self {
        ReplayError::ProgressBarTemplate(error.to_string())
    }
}
