//! Visitor comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{required, ValidationError};

pub const MAX_USERNAME_LENGTH: usize = 50;
pub const MAX_COMMENT_LENGTH: usize = 1000;

#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Comment as submitted by a visitor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentDraft {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, rename = "postId", alias = "post_id")]
    pub post_id: String,
}

impl CommentDraft {
    /// Validate and trim the draft.
    ///
    /// Lengths are counted in characters after trimming.
    pub fn validate(&self) -> Result<CommentDraft, ValidationError> {
        let username = required(&self.username, "username")?;
        let content = required(&self.content, "content")?;
        let post_id = required(&self.post_id, "postId")?;

        if content.chars().count() > MAX_COMMENT_LENGTH {
            return Err(ValidationError(format!(
                "Comment too long (max {} characters)",
                MAX_COMMENT_LENGTH
            )));
        }
        if username.chars().count() > MAX_USERNAME_LENGTH {
            return Err(ValidationError(format!(
                "Username too long (max {} characters)",
                MAX_USERNAME_LENGTH
            )));
        }

        Ok(CommentDraft {
            username: username.to_string(),
            content: content.to_string(),
            post_id: post_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(username: &str, content: &str) -> CommentDraft {
        CommentDraft {
            username: username.to_string(),
            content: content.to_string(),
            post_id: "post-1".to_string(),
        }
    }

    #[test]
    fn test_trims() {
        let ok = draft("  riddle ", "\n nice run \n").validate().unwrap();
        assert_eq!(ok.username, "riddle");
        assert_eq!(ok.content, "nice run");
    }

    #[test]
    fn test_limits() {
        assert!(draft(&"u".repeat(50), "ok").validate().is_ok());
        assert!(draft(&"u".repeat(51), "ok").validate().is_err());
        assert!(draft("u", &"c".repeat(1000)).validate().is_ok());
        assert!(draft("u", &"c".repeat(1001)).validate().is_err());
        // Multibyte characters count once.
        assert!(draft(&"é".repeat(50), "ok").validate().is_ok());
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert!(draft("   ", "text").validate().is_err());
        assert!(draft("name", "  ").validate().is_err());
        let mut d = draft("name", "text");
        d.post_id.clear();
        assert!(d.validate().is_err());
    }
}
