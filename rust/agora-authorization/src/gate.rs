//! The authorization gate.
//!
//! [`Gate`] is the single entry point the service layer calls before it
//! commits a write. It applies, in order:
//!
//! 1. the safe-operation bypass (reads are always allowed),
//! 2. the anonymous short-circuit (unsafe operations need a user),
//! 3. the creation rule (any authenticated user may create),
//! 4. the [permission policy](crate::evaluate) for updates and deletes.
//!
//! The gate holds no state; calling it twice on the same input gives the
//! same [`Decision`].

use crate::{
    AgoraAuthorizationError, Denial, Operation, Predicate, Principal, ResourceGraph, ResourceKind,
    Resolved, Target, UserId, evaluate,
};

/// Why a decision allowed the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grant {
    /// Reads are never gated.
    SafeOperation,
    /// Creation only requires an authenticated principal.
    Authenticated,
    /// Superusers pass every check.
    Superuser,
    /// A predicate from the resource kind's table held.
    Predicate(Predicate),
}

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The operation may proceed.
    Allow(Grant),
    /// The operation must be refused.
    Deny(Denial),
}

impl Decision {
    /// Whether the operation may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }

    /// Convert into a `Result` so denials propagate with `?`.
    pub fn into_result(self) -> Result<Grant, Denial> {
        match self {
            Self::Allow(grant) => Ok(grant),
            Self::Deny(denial) => Err(denial),
        }
    }
}

/// The user a newly created record must be attributed to.
///
/// Only [`Gate::authenticate`] produces one, so a record's author or owner
/// can only come from the acting principal and never from request input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribution(UserId);

impl Attribution {
    /// The user to record as author or owner.
    pub fn user(&self) -> UserId {
        self.0
    }
}

/// Stateless front door to the permission policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gate;

impl Gate {
    /// Creates a gate.
    pub fn new() -> Self {
        Self
    }

    /// Decide whether `principal` may perform `operation` on `resource`.
    ///
    /// For [`Operation::Create`], `resource` is the parent the new record
    /// would be created under.
    pub fn check(
        &self,
        principal: &Principal,
        operation: Operation,
        resource: &Resolved<'_>,
    ) -> Decision {
        let decision = Self::decide(principal, operation, resource);
        match decision {
            Decision::Allow(grant) => tracing::debug!(
                %principal,
                %operation,
                target = %resource.target(),
                ?grant,
                "allowed"
            ),
            Decision::Deny(denial) => tracing::debug!(
                %principal,
                %operation,
                target = %resource.target(),
                %denial,
                "denied"
            ),
        }
        decision
    }

    /// Decide whether `principal` may perform `operation` on the whole
    /// collection of `kind`, such as listing every community.
    ///
    /// A collection has no owner or author, so updates and deletes are left
    /// to superusers.
    pub fn check_collection(
        &self,
        principal: &Principal,
        operation: Operation,
        kind: ResourceKind,
    ) -> Decision {
        let decision = Self::admit(principal, operation).unwrap_or_else(|| {
            if principal.is_superuser() {
                Decision::Allow(Grant::Superuser)
            } else {
                Decision::Deny(Denial::Forbidden)
            }
        });
        match decision {
            Decision::Allow(grant) => {
                tracing::debug!(%principal, %operation, %kind, ?grant, "allowed")
            }
            Decision::Deny(denial) => {
                tracing::debug!(%principal, %operation, %kind, %denial, "denied")
            }
        }
        decision
    }

    fn decide(principal: &Principal, operation: Operation, resource: &Resolved<'_>) -> Decision {
        match (Self::admit(principal, operation), principal.as_user()) {
            (Some(decision), _) => decision,
            (None, Some(user)) => evaluate(user, resource),
            (None, None) => Decision::Deny(Denial::Unauthenticated),
        }
    }

    /// The rules that hold regardless of the resource: the safe-operation
    /// bypass, the anonymous short-circuit and creation. `None` means the
    /// resource has to be consulted.
    fn admit(principal: &Principal, operation: Operation) -> Option<Decision> {
        if operation.is_safe() {
            return Some(Decision::Allow(Grant::SafeOperation));
        }
        if principal.is_anonymous() {
            return Some(Decision::Deny(Denial::Unauthenticated));
        }
        match operation {
            Operation::Create => Some(Decision::Allow(Grant::Authenticated)),
            _ => None,
        }
    }

    /// Admit `principal` to a creation and return who the new record is
    /// attributed to.
    pub fn authenticate(&self, principal: &Principal) -> Result<Attribution, Denial> {
        match principal.id() {
            Some(user) => Ok(Attribution(user)),
            None => {
                tracing::debug!(%principal, "creation denied");
                Err(Denial::Unauthenticated)
            }
        }
    }

    /// Resolve `target` through `graph` and check it.
    ///
    /// Existence is established first, so a missing target is reported as
    /// [`AgoraAuthorizationError::NotFound`] regardless of who is asking.
    /// On success the resolved chain is returned so the caller can act on the
    /// exact state that was authorized.
    pub fn authorize<'a, G>(
        &self,
        graph: &'a G,
        principal: &Principal,
        operation: Operation,
        target: Target,
    ) -> Result<Resolved<'a>, AgoraAuthorizationError>
    where
        G: ResourceGraph + ?Sized,
    {
        let resolved = graph.resolve(target)?;
        self.check(principal, operation, &resolved).into_result()?;
        Ok(resolved)
    }
}
