//! Shared utility functions.
//!
//! - `html`: HTML escaping for safe rendering
//! - `format`: Human-readable formatting (playtimes, excerpts)

mod format;
mod html;

pub use format::{format_playtime, parse_playtime_hours, excerpt_lines};
pub use html::html_escape;
