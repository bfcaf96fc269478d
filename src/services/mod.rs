//! Service layer for journal workflows and external integrations.
//!
//! Services can be used by the CLI and the web server alike.

pub mod media_library;
pub mod stats;
pub mod steam;

pub use media_library::{MediaDeletion, MediaLibrary, UploadedMedia};
pub use stats::{journal_stats, JournalStats};
pub use steam::{SteamClient, SteamConfig, SteamError, SteamParams};
