//! Atomic permission predicates.
//!
//! Each resource kind has a fixed, ordered table of predicates. A principal
//! may perform an unsafe operation when any predicate in the table holds.
//!
//! | Kind      | Predicates                  |
//! |-----------|-----------------------------|
//! | Community | `CommunityOwner`            |
//! | Post      | `Author`, `CommunityStaff`  |
//! | Comment   | `Author`, `CommunityStaff`  |
//!
//! Tables list identity comparisons before set membership. Superusers are
//! not a predicate: [`evaluate`](crate::evaluate) admits them before any
//! table is consulted.

use crate::{ResourceKind, Resolved, User};
use std::fmt::{Display, Formatter};

/// A single boolean test contributing to an allow decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// The principal owns the community at the top of the chain.
    CommunityOwner,
    /// The principal wrote the post or comment.
    Author,
    /// The principal owns or moderates the community at the top of the chain.
    CommunityStaff,
}

const COMMUNITY: &[Predicate] = &[Predicate::CommunityOwner];

const POST: &[Predicate] = &[Predicate::Author, Predicate::CommunityStaff];

const COMMENT: &[Predicate] = &[Predicate::Author, Predicate::CommunityStaff];

impl Predicate {
    /// The predicates guarding unsafe operations on `kind`, in evaluation
    /// order.
    pub fn table(kind: ResourceKind) -> &'static [Predicate] {
        match kind {
            ResourceKind::Community => COMMUNITY,
            ResourceKind::Post => POST,
            ResourceKind::Comment => COMMENT,
        }
    }

    /// Whether this predicate holds for `user` acting on `resource`.
    ///
    /// A cleared owner or author never matches.
    pub fn holds(self, user: &User, resource: &Resolved<'_>) -> bool {
        match self {
            Self::CommunityOwner => resource.roles().is_owner(user.id),
            Self::Author => resource.author() == Some(user.id),
            Self::CommunityStaff => resource.roles().is_staff(user.id),
        }
    }

    /// First predicate in `kind`'s table that holds, if any.
    pub fn first_satisfied(user: &User, resource: &Resolved<'_>) -> Option<Predicate> {
        Self::table(resource.kind())
            .iter()
            .copied()
            .find(|predicate| {
                let holds = predicate.holds(user, resource);
                tracing::trace!(%predicate, user = %user.id, target = %resource.target(), holds);
                holds
            })
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::CommunityOwner => "community_owner",
            Self::Author => "author",
            Self::CommunityStaff => "community_staff",
        };
        f.write_str(name)
    }
}
