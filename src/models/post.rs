//! Game log posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::{MediaItem, NewMediaItem};
use super::{required, ValidationError};

/// How the author felt about a gaming session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Excited,
    Frustrated,
    Satisfied,
    Disappointed,
    Amazed,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Self::Excited,
        Self::Frustrated,
        Self::Satisfied,
        Self::Disappointed,
        Self::Amazed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excited => "excited",
            Self::Frustrated => "frustrated",
            Self::Satisfied => "satisfied",
            Self::Disappointed => "disappointed",
            Self::Amazed => "amazed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "excited" => Some(Self::Excited),
            "frustrated" => Some(Self::Frustrated),
            "satisfied" => Some(Self::Satisfied),
            "disappointed" => Some(Self::Disappointed),
            "amazed" => Some(Self::Amazed),
            _ => None,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Excited => "🤩",
            Self::Frustrated => "😤",
            Self::Satisfied => "😌",
            Self::Disappointed => "😞",
            Self::Amazed => "😲",
        }
    }
}

/// A journal entry about a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamePost {
    pub id: String,
    pub title: String,
    pub game: String,
    pub game_logo: Option<String>,
    pub platform: String,
    /// Source text in the journal markup; rendered with `format_content`.
    pub content: String,
    /// Free-form playtime such as "45 hours" or "120h".
    pub playtime: Option<String>,
    pub rating: Option<i32>,
    pub mood: Mood,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GamePost {
    /// Prefixes marking a post created by the media upload endpoint.
    pub const MEDIA_TITLE_PREFIX: &'static str = "Media:";
    pub const MEDIA_CONTENT_PREFIX: &'static str = "Media uploaded:";

    /// Whether this post only exists to own an uploaded media item.
    pub fn is_standalone_media(&self) -> bool {
        self.title.starts_with(Self::MEDIA_TITLE_PREFIX)
            && self.content.starts_with(Self::MEDIA_CONTENT_PREFIX)
    }

    /// Rating rendered as filled and empty stars.
    pub fn stars(&self) -> Option<String> {
        self.rating.map(|r| {
            let filled = r.clamp(0, 5) as usize;
            format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
        })
    }
}

/// A post together with its media items, as served by the API.
#[derive(Debug, Clone, Serialize)]
pub struct PostWithMedia {
    #[serde(flatten)]
    pub post: GamePost,
    pub media_items: Vec<MediaItem>,
}

/// Fields accepted when creating a post.
#[derive(Debug, Clone, Deserialize)]
pub struct NewGamePost {
    pub title: String,
    pub game: String,
    #[serde(default, alias = "gameLogo")]
    pub game_logo: Option<String>,
    pub platform: String,
    pub content: String,
    #[serde(default)]
    pub playtime: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,
    pub mood: String,
    #[serde(default, alias = "mediaItems")]
    pub media_items: Vec<NewMediaItem>,
}

impl NewGamePost {
    /// Check required fields and ranges, returning the parsed mood.
    pub fn validate(&self) -> Result<Mood, ValidationError> {
        required(&self.title, "title")?;
        required(&self.game, "game")?;
        required(&self.platform, "platform")?;
        required(&self.content, "content")?;

        if let Some(rating) = self.rating {
            if !(1..=5).contains(&rating) {
                return Err(ValidationError::new("rating must be between 1 and 5"));
            }
        }

        for item in &self.media_items {
            required(&item.url, "media url")?;
        }

        Mood::from_str(&self.mood)
            .ok_or_else(|| ValidationError(format!("unknown mood: {}", self.mood)))
    }

    /// Blank optional strings are stored as absent.
    pub fn normalized_playtime(&self) -> Option<&str> {
        non_blank(self.playtime.as_deref())
    }

    pub fn normalized_game_logo(&self) -> Option<&str> {
        non_blank(self.game_logo.as_deref())
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
