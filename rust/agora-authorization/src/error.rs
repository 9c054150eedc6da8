use crate::Target;

/// Why an operation was refused.
///
/// Every denial is a final decision for the state it was computed against;
/// repeating the check without a state change yields the same denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Denial {
    /// The operation requires an authenticated principal.
    #[error("Authentication required")]
    Unauthenticated,

    /// The principal holds no role that permits the operation.
    #[error("Permission denied")]
    Forbidden,

    /// A link in the target's ancestor chain does not resolve.
    #[error("Cannot authorize {target}: ancestor {missing} not found")]
    AncestorNotFound {
        /// The resource being acted on.
        target: Target,
        /// The ancestor that is missing.
        missing: Target,
    },
}

/// Errors returned when resolving and authorizing in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AgoraAuthorizationError {
    /// The addressed resource does not exist.
    #[error("{0} not found")]
    NotFound(Target),

    /// The resource exists but the operation was refused.
    #[error(transparent)]
    Denied(#[from] Denial),
}
