//! Database context for managing connections and repository access.
//!
//! The DbContext is the primary entry point for all database operations.
//! It holds the connection pool and hands out repositories that share it.

use std::path::Path;

use diesel_async::SimpleAsyncConnection;

use super::comments::CommentRepository;
use super::likes::LikeRepository;
use super::media::MediaRepository;
use super::pool::{DbError, SqlitePool};
use super::posts::PostRepository;
use super::rants::RantRepository;

const SCHEMA_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS game_posts (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        game TEXT NOT NULL,
        game_logo TEXT,
        platform TEXT NOT NULL,
        content TEXT NOT NULL,
        playtime TEXT,
        rating INTEGER CHECK (rating IS NULL OR rating BETWEEN 1 AND 5),
        mood TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_game_posts_created_at ON game_posts(created_at);

    CREATE TABLE IF NOT EXISTS media_items (
        id TEXT PRIMARY KEY,
        post_id TEXT NOT NULL REFERENCES game_posts(id) ON DELETE CASCADE,
        kind TEXT NOT NULL CHECK (kind IN ('screenshot', 'video', 'youtube')),
        url TEXT NOT NULL,
        caption TEXT,
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_media_items_post ON media_items(post_id);

    CREATE TABLE IF NOT EXISTS comments (
        id TEXT PRIMARY KEY,
        post_id TEXT NOT NULL REFERENCES game_posts(id) ON DELETE CASCADE,
        username TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_comments_post ON comments(post_id, created_at);

    CREATE TABLE IF NOT EXISTS likes (
        id TEXT PRIMARY KEY,
        post_id TEXT NOT NULL REFERENCES game_posts(id) ON DELETE CASCADE,
        user_agent TEXT NOT NULL,
        ip_address TEXT NOT NULL,
        created_at TEXT NOT NULL,
        UNIQUE (post_id, user_agent)
    );

    CREATE TABLE IF NOT EXISTS quick_rants (
        id TEXT PRIMARY KEY,
        game TEXT NOT NULL,
        content TEXT NOT NULL,
        mood TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_quick_rants_created_at ON quick_rants(created_at);
"#;

/// Database context that manages the connection pool and provides repository access.
///
/// # Example
/// ```ignore
/// let ctx = DbContext::new(&db_path);
/// ctx.init_schema().await?;
/// let posts = ctx.posts().list_with_media(None).await?;
/// ```
#[derive(Clone, Debug)]
pub struct DbContext {
    pool: SqlitePool,
}

impl DbContext {
    /// Create a context from a database file path.
    pub fn new(db_path: &Path) -> Self {
        Self {
            pool: SqlitePool::from_path(db_path),
        }
    }

    /// Create a context from a database URL (`sqlite:` prefix optional).
    pub fn from_url(url: &str) -> Self {
        Self {
            pool: SqlitePool::new(url),
        }
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn posts(&self) -> PostRepository {
        PostRepository::new(self.pool.clone())
    }

    pub fn media(&self) -> MediaRepository {
        MediaRepository::new(self.pool.clone())
    }

    pub fn comments(&self) -> CommentRepository {
        CommentRepository::new(self.pool.clone())
    }

    pub fn likes(&self) -> LikeRepository {
        LikeRepository::new(self.pool.clone())
    }

    pub fn rants(&self) -> RantRepository {
        RantRepository::new(self.pool.clone())
    }

    /// Create all tables and indexes if they don't exist.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        let mut conn = self.pool.get().await?;
        conn.batch_execute(SCHEMA_SQL).await
    }

    /// List user tables, for diagnostics.
    pub async fn list_tables(&self) -> Result<Vec<String>, DbError> {
        let mut conn = self.pool.get().await?;
        let rows: Vec<TableName> = diesel_async::RunQueryDsl::load(
            diesel::sql_query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
            ),
            &mut conn,
        )
        .await?;
        Ok(rows.into_iter().map(|r| r.name).collect())
    }
}

#[derive(diesel::QueryableByName)]
struct TableName {
    #[diesel(sql_type = diesel::sql_types::Text)]
    name: String,
}
