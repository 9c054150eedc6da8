//! Stored records.

use agora_authorization::{CommentId, CommunityId, CommunityRoles, PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A community (subreddit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    /// Identifier.
    pub id: CommunityId,
    /// Unique display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Owner and moderators.
    #[serde(flatten)]
    pub roles: CommunityRoles,
    /// When the community was created.
    pub created_at: DateTime<Utc>,
    /// When the community was last edited.
    pub updated_at: DateTime<Utc>,
}

/// A post within a community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Identifier.
    pub id: PostId,
    /// Headline.
    pub title: String,
    /// Body.
    pub text: Option<String>,
    /// The community the post currently belongs to.
    pub community: CommunityId,
    /// Who wrote it; cleared when their account is removed.
    pub author: Option<UserId>,
    /// When the post was created.
    pub created_at: DateTime<Utc>,
    /// When the post was last edited.
    pub updated_at: DateTime<Utc>,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Identifier.
    pub id: CommentId,
    /// Body.
    pub text: String,
    /// The post the comment is on.
    pub post: PostId,
    /// Who wrote it; cleared when their account is removed.
    pub author: Option<UserId>,
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
    /// When the comment was last edited.
    pub updated_at: DateTime<Utc>,
}

/// Summary of what [`Forum::remove_account`](crate::Forum::remove_account)
/// changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccountRemoval {
    /// Communities where the account held a role.
    pub communities: usize,
    /// Posts whose author was cleared.
    pub posts: usize,
    /// Comments whose author was cleared.
    pub comments: usize,
}
