//! Structured error types for the Flexo crates.

use thiserror::Error;

/// Unified error type for all Flexo operations.
#[derive(Debug, Error)]
pub enum FlexoError {
    /// Missing or inconsistent configuration (e.g. scoring before both
    /// graphs are assigned).
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid input (bad arguments, out-of-range values, mismatched sizes)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A capability requested from a collaborator that it does not provide
    #[error("unsupported capability: {0}")]
    Unsupported(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the Flexo crates.
pub type Result<T> = std::result::Result<T, FlexoError>;
