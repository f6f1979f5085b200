//! Typed errors for the compiler library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can match on
//! the offending bundle or result index.

use thiserror::Error;

/// Errors raised while turning untyped input into a compilation request.
///
/// The typed pipeline itself never fails; every variant here is produced at the
/// boundary before any stage runs.
#[derive(Debug, Error)]
pub enum CompilerError {
    /// Query missing or not a string
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    /// A response bundle is malformed
    #[error("invalid response bundle at index {index}: {reason}")]
    InvalidBundle { index: usize, reason: String },

    /// A result inside a bundle cannot be content-keyed
    #[error("invalid result {index} in response bundle {bundle}: {reason}")]
    InvalidResult {
        bundle: usize,
        index: usize,
        reason: String,
    },

    /// Known configuration option has the wrong type
    #[error("config error: {reason}")]
    Config { reason: String },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl CompilerError {
    pub(crate) fn bundle(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidBundle {
            index,
            reason: reason.into(),
        }
    }

    pub(crate) fn result(bundle: usize, index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidResult {
            bundle,
            index,
            reason: reason.into(),
        }
    }
}

/// Result type alias for compiler operations.
pub type Result<T> = std::result::Result<T, CompilerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_offending_index() {
        let err = CompilerError::result(2, 5, "arrays cannot be content-keyed");
        assert_eq!(
            err.to_string(),
            "invalid result 5 in response bundle 2: arrays cannot be content-keyed"
        );

        let err = CompilerError::bundle(1, "missing `results`");
        assert_eq!(
            err.to_string(),
            "invalid response bundle at index 1: missing `results`"
        );
    }
}
