//! Error types for the specula crate.

use thiserror::Error;

use crate::predicate::ParamId;

/// Errors that can occur when building or evaluating specifications.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A specification factory received an argument it cannot work with.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: String,
    },

    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Page number and page size must both be at least 1.
    #[error("invalid page window: page {number} of size {size}")]
    InvalidPage { number: usize, size: usize },

    /// Requested page size is above the configured maximum.
    #[error("page size {size} exceeds the configured maximum of {max}")]
    PageSizeExceeded { size: usize, max: usize },

    /// The expression reads a parameter the enclosing predicate does not bind.
    #[error("expression references parameter {found}, but the predicate binds {expected}")]
    UnboundParameter { found: ParamId, expected: ParamId },
}

impl SpecError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        SpecError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type for specula operations.
pub type Result<T> = std::result::Result<T, SpecError>;
