//! Data models for the gaming journal.

mod comment;
mod like;
mod media;
mod post;
mod rant;

pub use comment::{Comment, CommentDraft, MAX_COMMENT_LENGTH, MAX_USERNAME_LENGTH};
pub use like::{LikeStatus, LikeToggle};
pub use media::{GalleryItem, MediaItem, MediaUpload, NewMediaItem};
pub use post::{GamePost, Mood, NewGamePost, PostWithMedia};
pub use rant::{NewQuickRant, QuickRant, RantMood};

/// Input rejected before it reaches the database.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Require a non-blank value, returning it trimmed.
pub(crate) fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError(format!("{} is required", field)));
    }
    Ok(trimmed)
}
