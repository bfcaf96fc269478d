//! Repository layer for database persistence.
//!
//! All database access uses Diesel with diesel-async's SQLite wrapper.
//! Repositories return [`StoreError`] so callers never inspect raw driver
//! errors.

pub mod comments;
pub mod context;
pub mod error;
pub mod likes;
pub mod media;
pub mod models;
pub mod pool;
pub mod posts;
pub mod rants;
pub mod util;

pub use comments::CommentRepository;
pub use context::DbContext;
pub use error::{StoreError, StoreResult};
pub use likes::LikeRepository;
pub use media::MediaRepository;
pub use pool::{DbError, SqlitePool};
pub use posts::PostRepository;
pub use rants::RantRepository;

use chrono::{DateTime, Utc};

/// Parse a datetime string from the database, defaulting to Unix epoch on error.
pub fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Fresh database with the schema applied, for tests.
#[cfg(test)]
pub(crate) async fn test_context() -> (DbContext, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let ctx = DbContext::new(&dir.path().join("test.db"));
    ctx.init_schema().await.unwrap();
    (ctx, dir)
}
