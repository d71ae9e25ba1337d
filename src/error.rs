//! Error types for loan validation, loading and output

use thiserror::Error;

/// Errors raised by the mortgage analytics engine
#[derive(Debug, Error)]
pub enum MortgageError {
    /// An input constraint was violated; nothing was computed
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfiguration { field: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MortgageError {
    /// Shorthand for an `InvalidConfiguration` error
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        MortgageError::InvalidConfiguration {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MortgageError>;
