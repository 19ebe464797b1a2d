//! Error types for retry configuration.
//!
//! Only configuration can fail inside this crate. Failures produced by a
//! wrapped operation are never converted into [`Error`]; they are handed back
//! to the caller exactly as the operation returned them.

use thiserror::Error;

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or validating a retry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A named option is missing, has the wrong type, or is out of bounds.
    ///
    /// Always returned from `configure`, before the wrapped operation runs.
    #[error("Invalid argument `{option}`: {reason}")]
    InvalidArgument {
        /// Name of the offending option
        option: String,
        /// Why the value was rejected
        reason: String,
    },

    /// An option document could not be parsed.
    #[error("Failed to parse {format} options: {message}")]
    Parse {
        /// Document format (`json` or `toml`)
        format: &'static str,
        /// Parser message
        message: String,
    },
}

impl Error {
    /// Create an [`Error::InvalidArgument`] for `option`.
    pub fn invalid_argument(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Create an [`Error::InvalidArgument`] for a required option that was not supplied.
    pub fn missing(option: impl Into<String>) -> Self {
        Self::invalid_argument(option, "required option was not supplied")
    }

    /// Returns `true` if this is an [`Error::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Name of the option this error refers to, if any.
    pub fn option(&self) -> Option<&str> {
        match self {
            Self::InvalidArgument { option, .. } => Some(option),
            Self::Parse { .. } => None,
        }
    }
}
