//! Community roles.
//!
//! Every community has at most one owner and any number of moderators. These
//! are the only roles in the system, and they are always attached to a
//! community: posts and comments inherit them through their ancestor chain.

use crate::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Identifier of a community.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommunityId(pub u64);

impl From<u64> for CommunityId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for CommunityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "community:{}", self.0)
    }
}

/// The owner and moderators of one community.
///
/// The owner need not be listed among the moderators. A cleared owner
/// (`None`) matches nobody.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityRoles {
    owner: Option<UserId>,
    moderators: BTreeSet<UserId>,
}

impl CommunityRoles {
    /// Roles with the given owner and no moderators.
    pub fn new(owner: Option<UserId>) -> Self {
        Self {
            owner,
            moderators: BTreeSet::new(),
        }
    }

    /// Roles owned by `owner`.
    pub fn owned_by(owner: impl Into<UserId>) -> Self {
        Self::new(Some(owner.into()))
    }

    /// Builder-style moderator assignment.
    pub fn with_moderator(mut self, moderator: impl Into<UserId>) -> Self {
        self.add_moderator(moderator.into());
        self
    }

    /// The current owner.
    pub fn owner(&self) -> Option<UserId> {
        self.owner
    }

    /// The current moderators.
    pub fn moderators(&self) -> &BTreeSet<UserId> {
        &self.moderators
    }

    /// Replace (or clear) the owner.
    pub fn set_owner(&mut self, owner: Option<UserId>) {
        self.owner = owner;
    }

    /// Add a moderator. Returns `false` if they already were one.
    pub fn add_moderator(&mut self, moderator: UserId) -> bool {
        self.moderators.insert(moderator)
    }

    /// Remove a moderator. Returns `false` if they were not one.
    pub fn remove_moderator(&mut self, moderator: UserId) -> bool {
        self.moderators.remove(&moderator)
    }

    /// Drop every role `user` holds here. Returns `true` if any was held.
    pub fn forget(&mut self, user: UserId) -> bool {
        let was_owner = self.owner == Some(user);
        if was_owner {
            self.owner = None;
        }
        self.moderators.remove(&user) || was_owner
    }

    /// Whether `user` owns the community.
    pub fn is_owner(&self, user: UserId) -> bool {
        self.owner == Some(user)
    }

    /// Whether `user` moderates the community.
    pub fn is_moderator(&self, user: UserId) -> bool {
        self.moderators.contains(&user)
    }

    /// Whether `user` is the owner or a moderator.
    pub fn is_staff(&self, user: UserId) -> bool {
        self.is_owner(user) || self.is_moderator(user)
    }
}

/// Lookup of community roles.
///
/// Implementations return the state as of the call; nothing may be cached
/// between evaluations.
pub trait RoleStore {
    /// Roles of `community`, or `None` if the community does not exist.
    fn roles(&self, community: CommunityId) -> Option<&CommunityRoles>;

    /// The owner of `community`. `None` when it has no owner or does not
    /// exist.
    fn owner_of(&self, community: CommunityId) -> Option<UserId> {
        self.roles(community).and_then(CommunityRoles::owner)
    }

    /// The moderators of `community`. Empty when it does not exist.
    fn moderators_of(&self, community: CommunityId) -> BTreeSet<UserId> {
        self.roles(community)
            .map(|roles| roles.moderators().clone())
            .unwrap_or_default()
    }
}
