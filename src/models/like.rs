//! Per-visitor likes.

use serde::{Deserialize, Serialize};

/// Like state of a post as seen by one visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeStatus {
    pub like_count: i64,
    pub liked: bool,
}

/// Body of a like toggle request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LikeToggle {
    #[serde(default, rename = "postId", alias = "post_id")]
    pub post_id: String,
}
