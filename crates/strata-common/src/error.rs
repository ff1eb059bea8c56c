//! Error types for Strata.

use thiserror::Error;

/// Result type alias using StrataError.
pub type Result<T> = std::result::Result<T, StrataError>;

/// Errors that can occur in Strata operations.
///
/// Absent keys are not errors: both index `search` operations return
/// `Option` for the not-found outcome.
#[derive(Debug, Error)]
pub enum StrataError {
    // Construction errors
    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter { name: String, value: String },

    #[error("Input not sorted ascending at position {position}")]
    UnsortedInput { position: usize },

    // Dataset errors
    #[error("Value range too small: requested {requested} unique keys, range holds {available}")]
    RangeTooSmall { requested: usize, available: usize },

    // I/O and serialization errors (report output)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StrataError {
    /// Shorthand for an [`StrataError::InvalidParameter`] with a displayable value.
    pub fn invalid_parameter(name: &str, value: impl std::fmt::Display) -> Self {
        StrataError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}
