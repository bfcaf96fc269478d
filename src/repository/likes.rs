//! Like repository.
//!
//! A visitor is identified by user agent; the `(post_id, user_agent)` unique
//! index makes a second like from the same agent a constraint violation.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::error::StoreResult;
use super::models::NewLikeRecord;
use super::pool::{DbError, SqliteConn, SqlitePool};
use super::util::{format_timestamp, new_id};
use crate::models::LikeStatus;
use crate::schema::{game_posts, likes};

#[derive(Clone)]
pub struct LikeRepository {
    pool: SqlitePool,
}

impl LikeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Like count for a post and whether `user_agent` liked it.
    pub async fn status(&self, post_id: &str, user_agent: &str) -> StoreResult<LikeStatus> {
        let mut conn = self.pool.get().await?;
        Ok(load_status(&mut conn, post_id, user_agent).await?)
    }

    /// Like the post if `user_agent` has not, otherwise remove the like.
    pub async fn toggle(
        &self,
        post_id: &str,
        user_agent: &str,
        ip_address: &str,
    ) -> StoreResult<LikeStatus> {
        let mut conn = self.pool.get().await?;
        let now = format_timestamp(&Utc::now());
        let id = new_id();

        let status = conn
            .transaction(|conn| {
                Box::pin(async move {
                    let post_count: i64 = game_posts::table
                        .filter(game_posts::id.eq(post_id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if post_count == 0 {
                        return Err(DbError::NotFound);
                    }

                    let existing: Option<String> = likes::table
                        .filter(likes::post_id.eq(post_id))
                        .filter(likes::user_agent.eq(user_agent))
                        .select(likes::id)
                        .first(conn)
                        .await
                        .optional()?;

                    match existing {
                        Some(like_id) => {
                            diesel::delete(likes::table.find(like_id))
                                .execute(conn)
                                .await?;
                        }
                        None => {
                            diesel::insert_into(likes::table)
                                .values(&NewLikeRecord {
                                    id: &id,
                                    post_id,
                                    user_agent,
                                    ip_address,
                                    created_at: &now,
                                })
                                .execute(conn)
                                .await?;
                        }
                    }

                    load_status(conn, post_id, user_agent).await
                })
            })
            .await?;

        Ok(status)
    }
}

async fn load_status(
    conn: &mut SqliteConn,
    post_id: &str,
    user_agent: &str,
) -> Result<LikeStatus, DbError> {
    let like_count: i64 = likes::table
        .filter(likes::post_id.eq(post_id))
        .count()
        .get_result(conn)
        .await?;

    let mine: i64 = likes::table
        .filter(likes::post_id.eq(post_id))
        .filter(likes::user_agent.eq(user_agent))
        .count()
        .get_result(conn)
        .await?;

    Ok(LikeStatus {
        like_count,
        liked: mine > 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewGamePost;
    use crate::repository::{test_context, StoreError};

    #[tokio::test]
    async fn test_toggle_round_trip() {
        let (ctx, _dir) = test_context().await;
        let post = ctx
            .posts()
            .create(&NewGamePost {
                title: "t".to_string(),
                game: "Tunic".to_string(),
                game_logo: None,
                platform: "PC".to_string(),
                content: "c".to_string(),
                playtime: None,
                rating: None,
                mood: "excited".to_string(),
                media_items: Vec::new(),
            })
            .await
            .unwrap();
        let repo = ctx.likes();
        let id = &post.post.id;

        let before = repo.status(id, "firefox").await.unwrap();
        assert_eq!(before, LikeStatus { like_count: 0, liked: false });

        let liked = repo.toggle(id, "firefox", "127.0.0.1").await.unwrap();
        assert_eq!(liked, LikeStatus { like_count: 1, liked: true });

        let other = repo.toggle(id, "curl", "127.0.0.1").await.unwrap();
        assert_eq!(other, LikeStatus { like_count: 2, liked: true });
        assert!(!repo.status(id, "safari").await.unwrap().liked);

        let unliked = repo.toggle(id, "firefox", "127.0.0.1").await.unwrap();
        assert_eq!(unliked, LikeStatus { like_count: 1, liked: false });
    }

    #[tokio::test]
    async fn test_toggle_missing_post() {
        let (ctx, _dir) = test_context().await;
        let err = ctx.likes().toggle("nope", "ua", "ip").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
