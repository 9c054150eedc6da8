use agora_authorization::{AgoraAuthorizationError, Denial, Target};
use thiserror::Error;

/// The common error type used by this crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgoraForumError {
    /// An unsafe operation was attempted without a principal
    #[error("Authentication required")]
    Unauthenticated,

    /// The principal holds no role permitting the operation
    #[error("Permission denied")]
    Forbidden,

    /// The addressed resource does not exist
    #[error("{0} not found")]
    NotFound(Target),

    /// The addressed resource exists but its ancestor chain is broken
    #[error("Cannot act on {target}: ancestor {missing} not found")]
    AncestorNotFound {
        /// The resource being acted on.
        target: Target,
        /// The ancestor that is missing.
        missing: Target,
    },

    /// A payload field failed validation
    #[error("Invalid {field}: {reason}")]
    Invalid {
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The write would violate a uniqueness constraint
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Settings could not be read or parsed
    #[error("Failed to load settings: {0}")]
    Settings(String),
}

impl AgoraForumError {
    /// The HTTP-equivalent status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            Self::Unauthenticated => 401,
            Self::Forbidden => 403,
            Self::NotFound(_) | Self::AncestorNotFound { .. } => 404,
            Self::Invalid { .. } => 400,
            Self::Conflict(_) => 409,
            Self::Settings(_) => 500,
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl From<Denial> for AgoraForumError {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::Unauthenticated => Self::Unauthenticated,
            Denial::Forbidden => Self::Forbidden,
            Denial::AncestorNotFound { target, missing } => {
                Self::AncestorNotFound { target, missing }
            }
        }
    }
}

impl From<AgoraAuthorizationError> for AgoraForumError {
    fn from(error: AgoraAuthorizationError) -> Self {
        match error {
            AgoraAuthorizationError::NotFound(target) => Self::NotFound(target),
            AgoraAuthorizationError::Denied(denial) => denial.into(),
        }
    }
}
