//! The `Post` domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Media kind attached to a post, when `has_media` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Image,
    Video,
    Gif,
}

/// A social-media post: immutable identity plus mutable engagement
/// counters.
///
/// Invariants: counters are non-negative; `media_type` is set only when
/// `has_media` is true. Created by simulation seeding or by a
/// compose/reply/reshare action; mutated only by the state-update
/// executor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,

    #[serde(default)]
    pub has_media: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub reshares: u64,
    #[serde(default)]
    pub replies: u64,
    #[serde(default)]
    pub velocity: f64,
}

/// Raised when a `Post` would be constructed with `media_type` set but
/// `has_media` false.
#[derive(Debug, thiserror::Error)]
#[error("media_type cannot be set when has_media is false")]
pub struct MediaConsistencyError;

impl Post {
    pub fn new(id: impl Into<String>, author_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author_id: author_id.into(),
            text: text.into(),
            timestamp: Utc::now(),
            has_media: false,
            media_type: None,
            media_description: None,
            parent_id: None,
            likes: 0,
            reshares: 0,
            replies: 0,
            velocity: 0.0,
        }
    }

    /// Validate the has_media/media_type consistency invariant.
    pub fn validate(&self) -> Result<(), MediaConsistencyError> {
        if !self.has_media && self.media_type.is_some() {
            return Err(MediaConsistencyError);
        }
        Ok(())
    }

    /// True when this post is a reply (has a `parent_id`).
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_media_type_without_has_media() {
        let mut post = Post::new("p1", "a1", "hello");
        post.media_type = Some(MediaType::Image);
        assert!(post.validate().is_err());
    }

    #[test]
    fn accepts_media_type_with_has_media() {
        let mut post = Post::new("p1", "a1", "hello");
        post.has_media = true;
        post.media_type = Some(MediaType::Image);
        assert!(post.validate().is_ok());
    }

    #[test]
    fn is_reply_reflects_parent_id() {
        let mut post = Post::new("p1", "a1", "hello");
        assert!(!post.is_reply());
        post.parent_id = Some("p0".into());
        assert!(post.is_reply());
    }
}
