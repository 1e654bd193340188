use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A value could not be decoded into one of the shared enums.
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}
