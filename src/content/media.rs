//! Media URL classification.
//!
//! Decides whether a URL points at a YouTube video, an image ("screenshot")
//! or a generic video file, falling back to the kind the uploader picked.
//! Rules are evaluated in a fixed order and the first match wins: YouTube
//! thumbnails and some YouTube URLs also look like image or video files, so
//! the YouTube rule must run before the extension rules.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Classification tag attached to a media URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    #[serde(rename = "screenshot")]
    Screenshot,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "youtube")]
    YouTube,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Screenshot => "screenshot",
            Self::Video => "video",
            Self::YouTube => "youtube",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "screenshot" => Some(Self::Screenshot),
            "video" => Some(Self::Video),
            "youtube" => Some(Self::YouTube),
            _ => None,
        }
    }

    /// Human label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Screenshot => "Image",
            Self::Video => "Video",
            Self::YouTube => "YouTube",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepted YouTube URL shapes; the capture is the (possibly empty) video id.
static YOUTUBE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(?i:youtube\.com)/watch\?v=|(?i:youtu\.be)/|(?i:youtube\.com)/embed/)([^&\n?#]*)").unwrap()
});

static IMAGE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp|bmp|svg)(\?.*)?$").unwrap()
});

static IMAGE_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(imgur\.com|i\.imgur\.com|cdn\.discordapp\.com|steamuserimages)").unwrap()
});

static VIDEO_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(mp4|webm|avi|mov|wmv|flv|mkv)(\?.*)?$").unwrap()
});

/// Check if a URL is one of the accepted YouTube URL shapes.
pub fn is_youtube_url(url: &str) -> bool {
    YOUTUBE_URL.is_match(url)
}

/// Classify a media URL, returning `declared` when no rule matches.
///
/// Never fails: malformed input simply falls through to the fallback.
pub fn classify(url: &str, declared: MediaKind) -> MediaKind {
    if is_youtube_url(url) {
        return MediaKind::YouTube;
    }

    if IMAGE_EXTENSION.is_match(url) || IMAGE_HOST.is_match(url) {
        return MediaKind::Screenshot;
    }

    if VIDEO_EXTENSION.is_match(url) {
        return MediaKind::Video;
    }

    declared
}

/// Extract the video id from a YouTube URL.
///
/// Returns `None` when the URL is not a YouTube URL or carries no id;
/// callers show a placeholder instead of an embed in that case.
pub fn extract_youtube_id(url: &str) -> Option<&str> {
    YOUTUBE_URL
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|id| !id.is_empty())
}

/// Thumbnail image for a YouTube video id.
pub fn youtube_thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/hqdefault.jpg", video_id)
}

/// Embeddable player URL for a YouTube video id.
pub fn youtube_embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", video_id)
}

/// A media URL together with its derived and declared kinds.
///
/// Not a stored entity: it is computed once and the `kind` is persisted
/// alongside whatever record owns the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaDescriptor {
    pub url: String,
    pub kind: MediaKind,
    pub declared_kind: MediaKind,
}

impl MediaDescriptor {
    /// Classify `url`, keeping the uploader's selection as the fallback.
    pub fn classify(url: impl Into<String>, declared_kind: MediaKind) -> Self {
        let url = url.into();
        let kind = classify(&url, declared_kind);
        Self {
            url,
            kind,
            declared_kind,
        }
    }

    /// Whether classification overrode the uploader's selection.
    pub fn was_reclassified(&self) -> bool {
        self.kind != self.declared_kind
    }

    pub fn youtube_id(&self) -> Option<&str> {
        match self.kind {
            MediaKind::YouTube => extract_youtube_id(&self.url),
            _ => None,
        }
    }
}
