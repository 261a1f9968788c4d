use thiserror::Error;

/// Represents the different types of errors that can occur during resolution.
#[derive(Debug, Error)]
pub enum NluError {
    /// The label catalog configuration is malformed. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),
    /// An embedding does not have the configured dimension. Indicates a
    /// model/config mismatch and is surfaced to the caller, never retried.
    #[error("Embedding dimension mismatch: expected {expected}, found {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    /// The external encoder failed to produce an embedding.
    #[error("Encoder error: {0}")]
    Encoder(String),
    /// The external token tagger failed to produce per-token scores.
    #[error("Tagger error: {0}")]
    Tagger(String),
    /// Error occurred during the build phase.
    #[error("Build error: {0}")]
    Build(String),
}

pub type Result<T> = std::result::Result<T, NluError>;
