//! Acting identities.
//!
//! A [`Principal`] is whoever performs an operation: either an authenticated
//! [`User`] or [`Principal::Anonymous`]. Authentication itself happens
//! elsewhere; the policy only ever sees the resolved principal.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

/// An authenticated account as seen by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    /// The account identifier.
    pub id: UserId,
    /// Superusers pass every check.
    pub is_superuser: bool,
}

impl User {
    /// A regular account.
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            is_superuser: false,
        }
    }

    /// An account with superuser standing.
    pub fn superuser(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            is_superuser: true,
        }
    }
}

/// The identity an operation is performed as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Principal {
    /// No authenticated identity.
    #[default]
    Anonymous,
    /// An authenticated account.
    User(User),
}

impl Principal {
    /// Principal for a regular account.
    pub fn user(id: impl Into<UserId>) -> Self {
        Self::User(User::new(id))
    }

    /// Principal for a superuser account.
    pub fn superuser(id: impl Into<UserId>) -> Self {
        Self::User(User::superuser(id))
    }

    /// The authenticated account, if any.
    pub fn as_user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::User(user) => Some(user),
        }
    }

    /// The account identifier, if authenticated.
    pub fn id(&self) -> Option<UserId> {
        self.as_user().map(|user| user.id)
    }

    /// Whether this is [`Principal::Anonymous`].
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// Whether this principal has superuser standing.
    pub fn is_superuser(&self) -> bool {
        self.as_user().is_some_and(|user| user.is_superuser)
    }
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Self::User(user)
    }
}

impl Display for Principal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::User(user) if user.is_superuser => write!(f, "{} (superuser)", user.id),
            Self::User(user) => write!(f, "{}", user.id),
        }
    }
}
