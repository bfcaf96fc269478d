//! Media items attached to posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{required, ValidationError};
use crate::content::{self, MediaKind};

/// A screenshot, video or YouTube link owned by a post.
#[derive(Debug, Clone, Serialize)]
pub struct MediaItem {
    pub id: String,
    pub post_id: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MediaItem {
    pub fn youtube_id(&self) -> Option<&str> {
        content::extract_youtube_id(&self.url)
    }
}

/// A media entry submitted as part of a new post.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMediaItem {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

impl NewMediaItem {
    /// Kind the author selected; unspecified entries fall back to screenshots.
    pub fn declared_kind(&self) -> Result<MediaKind, ValidationError> {
        match self.kind.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            None => Ok(MediaKind::Screenshot),
            Some(k) => MediaKind::from_str(k)
                .ok_or_else(|| ValidationError(format!("unknown media type: {}", k))),
        }
    }
}

/// Body of a standalone media upload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaUpload {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub game: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

impl MediaUpload {
    /// All four fields are required; returns the declared kind.
    pub fn validate(&self) -> Result<MediaKind, ValidationError> {
        for (value, field) in [
            (&self.url, "url"),
            (&self.caption, "caption"),
            (&self.game, "game"),
            (&self.kind, "type"),
        ] {
            required(value, field)?;
        }
        MediaKind::from_str(&self.kind)
            .ok_or_else(|| ValidationError(format!("unknown media type: {}", self.kind)))
    }
}

/// A media item flattened with the game of its owning post.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    /// Falls back to "{game} media" when the item has no caption.
    pub caption: String,
    pub game: String,
    pub post_id: String,
}

impl GalleryItem {
    pub fn new(item: MediaItem, game: String) -> Self {
        let caption = item
            .caption
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| format!("{} media", game));
        Self {
            id: item.id,
            kind: item.kind,
            url: item.url,
            caption,
            game,
            post_id: item.post_id,
        }
    }

    pub fn youtube_id(&self) -> Option<&str> {
        content::extract_youtube_id(&self.url)
    }

    /// Image shown in grids: the URL itself, or the YouTube thumbnail.
    pub fn thumbnail_url(&self) -> Option<String> {
        match self.kind {
            MediaKind::Screenshot => Some(self.url.clone()),
            MediaKind::YouTube => self.youtube_id().map(content::youtube_thumbnail_url),
            MediaKind::Video => None,
        }
    }
}
