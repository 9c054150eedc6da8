use crate::{Decision, Denial, Grant, Predicate, Resolved, User};

/// Decide an update or delete of `resource` by an authenticated `user`.
///
/// Superusers are allowed outright. Otherwise the predicate table for the
/// resource kind is OR-combined; if nothing holds the answer is
/// [`Denial::Forbidden`]. The safe-operation bypass, the anonymous check and
/// creation are handled by [`Gate`](crate::Gate) before this is reached.
pub fn evaluate(user: &User, resource: &Resolved<'_>) -> Decision {
    if user.is_superuser {
        return Decision::Allow(Grant::Superuser);
    }

    match Predicate::first_satisfied(user, resource) {
        Some(predicate) => Decision::Allow(Grant::Predicate(predicate)),
        None => Decision::Deny(Denial::Forbidden),
    }
}
