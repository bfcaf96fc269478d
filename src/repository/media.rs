//! Media item repository.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::error::StoreResult;
use super::models::{MediaRecord, NewMediaRecord};
use super::pool::SqlitePool;
use super::util::{format_timestamp, new_id};
use crate::content::{MediaDescriptor, MediaKind};
use crate::models::{GalleryItem, MediaItem};
use crate::schema::{game_posts, media_items};

#[derive(Clone)]
pub struct MediaRepository {
    pool: SqlitePool,
}

impl MediaRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Attach a classified media URL to an existing post.
    pub async fn create(
        &self,
        post_id: &str,
        descriptor: &MediaDescriptor,
        caption: Option<&str>,
    ) -> StoreResult<MediaItem> {
        let mut conn = self.pool.get().await?;
        let item = MediaItem {
            id: new_id(),
            post_id: post_id.to_string(),
            kind: descriptor.kind,
            url: descriptor.url.clone(),
            caption: caption.map(String::from),
            created_at: Utc::now(),
        };
        let created_at = format_timestamp(&item.created_at);

        diesel::insert_into(media_items::table)
            .values(&NewMediaRecord {
                id: &item.id,
                post_id: &item.post_id,
                kind: item.kind.as_str(),
                url: &item.url,
                caption: item.caption.as_deref(),
                created_at: &created_at,
            })
            .execute(&mut conn)
            .await?;

        Ok(item)
    }

    pub async fn get(&self, id: &str) -> StoreResult<Option<MediaItem>> {
        let mut conn = self.pool.get().await?;

        let record = media_items::table
            .find(id)
            .select(MediaRecord::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(record.map(MediaItem::from))
    }

    /// Every media row, in insertion order.
    pub async fn list_all(&self) -> StoreResult<Vec<MediaItem>> {
        let mut conn = self.pool.get().await?;

        let records: Vec<MediaRecord> = media_items::table
            .select(MediaRecord::as_select())
            .order(media_items::created_at.asc())
            .load(&mut conn)
            .await?;

        Ok(records.into_iter().map(MediaItem::from).collect())
    }

    /// Media joined with the owning post's game, newest post first.
    pub async fn gallery(
        &self,
        kind: Option<MediaKind>,
        limit: Option<i64>,
    ) -> StoreResult<Vec<GalleryItem>> {
        let mut conn = self.pool.get().await?;

        let mut query = media_items::table
            .inner_join(game_posts::table)
            .select((MediaRecord::as_select(), game_posts::game))
            .order((game_posts::created_at.desc(), media_items::created_at.asc()))
            .into_boxed();
        if let Some(kind) = kind {
            query = query.filter(media_items::kind.eq(kind.as_str()));
        }
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let rows: Vec<(MediaRecord, String)> = query.load(&mut conn).await?;
        Ok(rows
            .into_iter()
            .map(|(record, game)| GalleryItem::new(record.into(), game))
            .collect())
    }

    pub async fn count_for_post(&self, post_id: &str) -> StoreResult<i64> {
        let mut conn = self.pool.get().await?;

        let count: i64 = media_items::table
            .filter(media_items::post_id.eq(post_id))
            .count()
            .get_result(&mut conn)
            .await?;

        Ok(count)
    }

    /// Overwrite the stored kind of one item.
    pub async fn update_kind(&self, id: &str, kind: MediaKind) -> StoreResult<bool> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::update(media_items::table.find(id))
            .set(media_items::kind.eq(kind.as_str()))
            .execute(&mut conn)
            .await?;

        Ok(rows > 0)
    }

    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::delete(media_items::table.find(id))
            .execute(&mut conn)
            .await?;

        Ok(rows > 0)
    }
}
