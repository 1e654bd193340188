use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DivinationError {
    /// A candle field (or a value derived from it) is not a finite number.
    #[error("Missing data: non-finite {field} at window position {position}")]
    MissingData { field: &'static str, position: usize },

    #[error("Not enough candles: needed {needed}, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// A generated symbol has no figure. This is a generator/classifier mismatch.
    #[error("Symbol {symbol} does not match any {kind}")]
    Classification { kind: &'static str, symbol: String },
}
