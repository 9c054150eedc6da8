//! Service settings.
//!
//! Every field has a default, so an empty JSON object is a valid settings
//! document. Unknown keys are rejected.
//!
//! ```json
//! { "limits": { "post_title": 120 } }
//! ```

use crate::AgoraForumError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum field lengths, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Community name.
    pub community_name: usize,
    /// Community description.
    pub community_description: usize,
    /// Post title.
    pub post_title: usize,
    /// Post body.
    pub post_text: usize,
    /// Comment body.
    pub comment_text: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            community_name: 256,
            community_description: 512,
            post_title: 256,
            post_text: 512,
            comment_text: 512,
        }
    }
}

/// Settings for a [`Forum`](crate::Forum).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Field length limits.
    pub limits: Limits,
}

impl Settings {
    /// Parse settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, AgoraForumError> {
        serde_json::from_str(json).map_err(|error| AgoraForumError::Settings(error.to_string()))
    }

    /// Read settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AgoraForumError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|error| AgoraForumError::Settings(format!("{}: {error}", path.display())))?;
        let settings = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }
}
