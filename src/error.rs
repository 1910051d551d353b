//! Crate-wide error type.
//!
//! Every failure the optimizer reports is a precondition violation at a
//! public boundary: a missing or malformed argument, or a count/step
//! number outside its allowed range. Nothing is retried; errors propagate
//! to the caller unchanged.

/// Errors reported by the fireworks optimizers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FwaError {
    /// A required argument is missing, empty, or malformed.
    #[error("invalid argument `{param}`: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter.
        param: &'static str,
        /// Human-readable description of the violation.
        reason: String,
    },

    /// A numeric argument lies outside its allowed range.
    #[error("argument `{param}` out of range: {reason}")]
    OutOfRange {
        /// Name of the offending parameter.
        param: &'static str,
        /// Human-readable description of the violation.
        reason: String,
    },
}

impl FwaError {
    pub(crate) fn invalid(param: &'static str, reason: impl Into<String>) -> Self {
        FwaError::InvalidArgument {
            param,
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(param: &'static str, reason: impl Into<String>) -> Self {
        FwaError::OutOfRange {
            param,
            reason: reason.into(),
        }
    }

    /// Name of the parameter this error refers to.
    pub fn param(&self) -> &'static str {
        match self {
            FwaError::InvalidArgument { param, .. } | FwaError::OutOfRange { param, .. } => param,
        }
    }

    /// Returns `true` for [`FwaError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, FwaError::InvalidArgument { .. })
    }

    /// Returns `true` for [`FwaError::OutOfRange`].
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, FwaError::OutOfRange { .. })
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FwaError>;
