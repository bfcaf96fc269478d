//! Comment repository.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::error::{StoreError, StoreResult};
use super::models::{CommentRecord, NewCommentRecord};
use super::parse_datetime;
use super::pool::SqlitePool;
use super::util::{format_timestamp, new_id};
use crate::models::{Comment, CommentDraft};
use crate::schema::{comments, game_posts};

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Comment {
            id: record.id,
            post_id: record.post_id,
            username: record.username,
            content: record.content,
            created_at: parse_datetime(&record.created_at),
        }
    }
}

#[derive(Clone)]
pub struct CommentRepository {
    pool: SqlitePool,
}

impl CommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Validate and store a visitor comment.
    ///
    /// Returns `NotFound` when the target post does not exist.
    pub async fn create(&self, draft: &CommentDraft) -> StoreResult<Comment> {
        let draft = draft.validate()?;
        let mut conn = self.pool.get().await?;

        let post_exists: i64 = game_posts::table
            .filter(game_posts::id.eq(&draft.post_id))
            .count()
            .get_result(&mut conn)
            .await?;
        if post_exists == 0 {
            return Err(StoreError::NotFound);
        }

        let comment = Comment {
            id: new_id(),
            post_id: draft.post_id,
            username: draft.username,
            content: draft.content,
            created_at: Utc::now(),
        };
        let created_at = format_timestamp(&comment.created_at);

        diesel::insert_into(comments::table)
            .values(&NewCommentRecord {
                id: &comment.id,
                post_id: &comment.post_id,
                username: &comment.username,
                content: &comment.content,
                created_at: &created_at,
            })
            .execute(&mut conn)
            .await?;

        Ok(comment)
    }

    /// Comments on a post, newest first.
    pub async fn list_for_post(&self, post_id: &str) -> StoreResult<Vec<Comment>> {
        let mut conn = self.pool.get().await?;

        let records: Vec<CommentRecord> = comments::table
            .filter(comments::post_id.eq(post_id))
            .order(comments::created_at.desc())
            .select(CommentRecord::as_select())
            .load(&mut conn)
            .await?;

        Ok(records.into_iter().map(Comment::from).collect())
    }

    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::delete(comments::table.find(id))
            .execute(&mut conn)
            .await?;

        Ok(rows > 0)
    }
}
