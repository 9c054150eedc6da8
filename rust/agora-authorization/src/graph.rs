//! Ancestor resolution.
//!
//! Resources form a fixed three-level hierarchy:
//!
//! ```text
//! Community (owner, moderators)
//!   └── Post (author)
//!         └── Comment (author)
//! ```
//!
//! Roles live only on communities. To decide anything about a post or a
//! comment, the policy needs the chain from that resource up to its
//! community, read from the *current* links. [`ResourceGraph::resolve`]
//! produces that chain as a [`Resolved`] value.

use crate::{AgoraAuthorizationError, CommunityId, CommunityRoles, Denial, RoleStore, UserId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl From<u64> for PostId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for PostId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "post:{}", self.0)
    }
}

/// Identifier of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub u64);

impl From<u64> for CommentId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for CommentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "comment:{}", self.0)
    }
}

/// The three resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A community (subreddit).
    Community,
    /// A post within a community.
    Post,
    /// A comment on a post.
    Comment,
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Community => "community",
            Self::Post => "post",
            Self::Comment => "comment",
        };
        f.write_str(name)
    }
}

/// A reference to a single resource of any kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "id")]
pub enum Target {
    /// A community.
    Community(CommunityId),
    /// A post.
    Post(PostId),
    /// A comment.
    Comment(CommentId),
}

impl Target {
    /// The kind of resource referenced.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Community(_) => ResourceKind::Community,
            Self::Post(_) => ResourceKind::Post,
            Self::Comment(_) => ResourceKind::Comment,
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Community(id) => id.fmt(f),
            Self::Post(id) => id.fmt(f),
            Self::Comment(id) => id.fmt(f),
        }
    }
}

impl From<CommunityId> for Target {
    fn from(id: CommunityId) -> Self {
        Self::Community(id)
    }
}

impl From<PostId> for Target {
    fn from(id: PostId) -> Self {
        Self::Post(id)
    }
}

impl From<CommentId> for Target {
    fn from(id: CommentId) -> Self {
        Self::Comment(id)
    }
}

/// A post's links: where it lives and who wrote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostLink {
    /// The community the post currently belongs to.
    pub community: CommunityId,
    /// The author, cleared if their account was removed.
    pub author: Option<UserId>,
}

/// A comment's links: which post it is on and who wrote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentLink {
    /// The post the comment belongs to.
    pub post: PostId,
    /// The author, cleared if their account was removed.
    pub author: Option<UserId>,
}

/// Read-only view of the resource hierarchy.
///
/// Implementations must answer from live state: if a post was moved to
/// another community, the next lookup reports the new community.
pub trait ResourceGraph: RoleStore {
    /// Links of `post`, or `None` if it does not exist.
    fn post(&self, post: PostId) -> Option<PostLink>;

    /// Links of `comment`, or `None` if it does not exist.
    fn comment(&self, comment: CommentId) -> Option<CommentLink>;

    /// Resolve `target` together with its ancestor chain.
    ///
    /// Fails with [`AgoraAuthorizationError::NotFound`] when `target` itself
    /// is missing and with [`Denial::AncestorNotFound`] when a link in its
    /// chain is dangling. A dangling chain is never treated as unrestricted.
    fn resolve(&self, target: Target) -> Result<Resolved<'_>, AgoraAuthorizationError> {
        match target {
            Target::Community(id) => {
                let roles = self
                    .roles(id)
                    .ok_or(AgoraAuthorizationError::NotFound(target))?;
                Ok(Resolved::Community { id, roles })
            }
            Target::Post(id) => {
                let link = self
                    .post(id)
                    .ok_or(AgoraAuthorizationError::NotFound(target))?;
                let roles = self
                    .roles(link.community)
                    .ok_or(Denial::AncestorNotFound {
                        target,
                        missing: Target::Community(link.community),
                    })?;
                Ok(Resolved::Post {
                    id,
                    author: link.author,
                    community: link.community,
                    roles,
                })
            }
            Target::Comment(id) => {
                let link = self
                    .comment(id)
                    .ok_or(AgoraAuthorizationError::NotFound(target))?;
                let post = self.post(link.post).ok_or(Denial::AncestorNotFound {
                    target,
                    missing: Target::Post(link.post),
                })?;
                let roles = self
                    .roles(post.community)
                    .ok_or(Denial::AncestorNotFound {
                        target,
                        missing: Target::Community(post.community),
                    })?;
                Ok(Resolved::Comment {
                    id,
                    author: link.author,
                    post: link.post,
                    community: post.community,
                    roles,
                })
            }
        }
    }
}

/// A resource together with its resolved ancestor chain.
///
/// Borrowed from the graph it was resolved from, so it cannot outlive the
/// snapshot it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// A community and its own roles.
    Community {
        /// The community.
        id: CommunityId,
        /// Its roles.
        roles: &'a CommunityRoles,
    },
    /// A post and the roles of the community it belongs to.
    Post {
        /// The post.
        id: PostId,
        /// Its author.
        author: Option<UserId>,
        /// The community it currently belongs to.
        community: CommunityId,
        /// Roles of that community.
        roles: &'a CommunityRoles,
    },
    /// A comment and the roles of its post's community.
    Comment {
        /// The comment.
        id: CommentId,
        /// Its author.
        author: Option<UserId>,
        /// The post it is on.
        post: PostId,
        /// The community that post belongs to.
        community: CommunityId,
        /// Roles of that community.
        roles: &'a CommunityRoles,
    },
}

impl<'a> Resolved<'a> {
    /// The kind of the resolved resource.
    pub fn kind(&self) -> ResourceKind {
        self.target().kind()
    }

    /// Reference to the resolved resource.
    pub fn target(&self) -> Target {
        match self {
            Self::Community { id, .. } => Target::Community(*id),
            Self::Post { id, .. } => Target::Post(*id),
            Self::Comment { id, .. } => Target::Comment(*id),
        }
    }

    /// The author of a post or comment. Communities have none.
    pub fn author(&self) -> Option<UserId> {
        match self {
            Self::Community { .. } => None,
            Self::Post { author, .. } | Self::Comment { author, .. } => *author,
        }
    }

    /// The community at the top of the chain.
    pub fn community(&self) -> CommunityId {
        match self {
            Self::Community { id, .. } => *id,
            Self::Post { community, .. } | Self::Comment { community, .. } => *community,
        }
    }

    /// Roles of the community at the top of the chain.
    pub fn roles(&self) -> &'a CommunityRoles {
        match self {
            Self::Community { roles, .. }
            | Self::Post { roles, .. }
            | Self::Comment { roles, .. } => *roles,
        }
    }
}
