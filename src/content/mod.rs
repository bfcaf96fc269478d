//! Shared content pipeline: media URL classification and post formatting.
//!
//! Every caller (media API, post creation, the reclassify command, the editor
//! preview and page rendering) goes through these two modules so there is a
//! single definition of how a URL is classified and how text is rendered.

pub mod format;
pub mod media;

pub use format::{format_content, format_untrusted};
pub use media::{
    classify, extract_youtube_id, is_youtube_url, youtube_embed_url, youtube_thumbnail_url,
    MediaDescriptor, MediaKind,
};
