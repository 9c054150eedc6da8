//! Request payloads.
//!
//! Payloads carry only the fields a client may set. Authorship and ownership
//! of new records are never read from them: unknown fields such as `author`
//! are ignored on deserialization and the service stamps the acting
//! principal instead.

use crate::{AgoraForumError, Limits};
use agora_authorization::{CommunityId, UserId};
use serde::{Deserialize, Serialize};

/// Checks a payload against configured limits.
pub trait Validate {
    /// Returns the first offending field.
    fn validate(&self, limits: &Limits) -> Result<(), AgoraForumError>;
}

fn required(field: &'static str, value: &str, max: usize) -> Result<(), AgoraForumError> {
    if value.trim().is_empty() {
        return Err(AgoraForumError::invalid(field, "may not be blank"));
    }
    optional(field, Some(value), max)
}

fn optional(field: &'static str, value: Option<&str>, max: usize) -> Result<(), AgoraForumError> {
    match value {
        Some(value) if value.chars().count() > max => Err(AgoraForumError::invalid(
            field,
            format!("must be at most {max} characters"),
        )),
        _ => Ok(()),
    }
}

/// Fields for a new community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCommunity {
    /// Unique display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for NewCommunity {
    fn validate(&self, limits: &Limits) -> Result<(), AgoraForumError> {
        required("name", &self.name, limits.community_name)?;
        optional(
            "description",
            self.description.as_deref(),
            limits.community_description,
        )
    }
}

/// Replacement fields for an existing community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityChanges {
    /// Unique display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Transfer ownership. Absent keeps the current owner.
    #[serde(default)]
    pub owner: Option<UserId>,
}

impl Validate for CommunityChanges {
    fn validate(&self, limits: &Limits) -> Result<(), AgoraForumError> {
        required("name", &self.name, limits.community_name)?;
        optional(
            "description",
            self.description.as_deref(),
            limits.community_description,
        )
    }
}

/// Fields for a new post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    /// Headline.
    pub title: String,
    /// Body.
    #[serde(default)]
    pub text: Option<String>,
}

impl Validate for NewPost {
    fn validate(&self, limits: &Limits) -> Result<(), AgoraForumError> {
        required("title", &self.title, limits.post_title)?;
        optional("text", self.text.as_deref(), limits.post_text)
    }
}

/// Replacement fields for an existing post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostChanges {
    /// Headline.
    pub title: String,
    /// Body.
    #[serde(default)]
    pub text: Option<String>,
    /// Move the post to another community. Absent keeps it where it is.
    #[serde(default)]
    pub community: Option<CommunityId>,
}

impl Validate for PostChanges {
    fn validate(&self, limits: &Limits) -> Result<(), AgoraForumError> {
        required("title", &self.title, limits.post_title)?;
        optional("text", self.text.as_deref(), limits.post_text)
    }
}

/// Fields for a new comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    /// Body.
    pub text: String,
}

impl Validate for NewComment {
    fn validate(&self, limits: &Limits) -> Result<(), AgoraForumError> {
        required("text", &self.text, limits.comment_text)
    }
}

/// Replacement fields for an existing comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentChanges {
    /// Body.
    pub text: String,
}

impl Validate for CommentChanges {
    fn validate(&self, limits: &Limits) -> Result<(), AgoraForumError> {
        required("text", &self.text, limits.comment_text)
    }
}
