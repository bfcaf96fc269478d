//! Game post repository.

use std::collections::HashSet;

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::error::StoreResult;
use super::models::{MediaRecord, NewMediaRecord, NewPostRecord, PostRecord};
use super::parse_datetime;
use super::pool::{DbError, SqlitePool};
use super::util::{format_timestamp, new_id};
use crate::content::{MediaDescriptor, MediaKind};
use crate::models::{GamePost, MediaItem, Mood, NewGamePost, PostWithMedia, ValidationError};
use crate::schema::{game_posts, media_items};

impl From<PostRecord> for GamePost {
    fn from(record: PostRecord) -> Self {
        GamePost {
            id: record.id,
            title: record.title,
            game: record.game,
            game_logo: record.game_logo,
            platform: record.platform,
            content: record.content,
            playtime: record.playtime,
            rating: record.rating,
            mood: Mood::from_str(&record.mood).unwrap_or(Mood::Satisfied),
            created_at: parse_datetime(&record.created_at),
            updated_at: parse_datetime(&record.updated_at),
        }
    }
}

impl From<MediaRecord> for MediaItem {
    fn from(record: MediaRecord) -> Self {
        MediaItem {
            id: record.id,
            post_id: record.post_id,
            kind: MediaKind::from_str(&record.kind).unwrap_or(MediaKind::Screenshot),
            url: record.url,
            caption: record.caption,
            created_at: parse_datetime(&record.created_at),
        }
    }
}

/// Repository for `game_posts`, including the media owned by each post.
#[derive(Clone)]
pub struct PostRepository {
    pool: SqlitePool,
}

impl PostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a post and its media items in one transaction.
    ///
    /// Every media URL is classified; the submitted type is only a fallback.
    pub async fn create(&self, draft: &NewGamePost) -> StoreResult<PostWithMedia> {
        let mood = draft.validate()?;
        let now = Utc::now();

        let post = GamePost {
            id: new_id(),
            title: draft.title.trim().to_string(),
            game: draft.game.trim().to_string(),
            game_logo: draft.normalized_game_logo().map(String::from),
            platform: draft.platform.trim().to_string(),
            content: draft.content.clone(),
            playtime: draft.normalized_playtime().map(String::from),
            rating: draft.rating,
            mood,
            created_at: now,
            updated_at: now,
        };

        let media_items = draft
            .media_items
            .iter()
            .map(|entry| {
                let descriptor = MediaDescriptor::classify(entry.url.trim(), entry.declared_kind()?);
                Ok(MediaItem {
                    id: new_id(),
                    post_id: post.id.clone(),
                    kind: descriptor.kind,
                    url: descriptor.url,
                    caption: entry
                        .caption
                        .as_deref()
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(String::from),
                    created_at: now,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        let created = PostWithMedia { post, media_items };
        self.insert(&created).await?;
        Ok(created)
    }

    async fn insert(&self, record: &PostWithMedia) -> Result<(), DbError> {
        let mut conn = self.pool.get().await?;
        let post = &record.post;
        let items = &record.media_items;
        let ts = format_timestamp(&post.created_at);

        conn.transaction(|conn| {
            Box::pin(async move {
                diesel::insert_into(game_posts::table)
                    .values(&NewPostRecord {
                        id: &post.id,
                        title: &post.title,
                        game: &post.game,
                        game_logo: post.game_logo.as_deref(),
                        platform: &post.platform,
                        content: &post.content,
                        playtime: post.playtime.as_deref(),
                        rating: post.rating,
                        mood: post.mood.as_str(),
                        created_at: &ts,
                        updated_at: &ts,
                    })
                    .execute(conn)
                    .await?;

                for item in items {
                    diesel::insert_into(media_items::table)
                        .values(&NewMediaRecord {
                            id: &item.id,
                            post_id: &item.post_id,
                            kind: item.kind.as_str(),
                            url: &item.url,
                            caption: item.caption.as_deref(),
                            created_at: &ts,
                        })
                        .execute(conn)
                        .await?;
                }

                Ok::<_, DbError>(())
            })
        })
        .await
    }

    /// Get a post by ID.
    pub async fn get(&self, id: &str) -> StoreResult<Option<GamePost>> {
        let mut conn = self.pool.get().await?;

        let record = game_posts::table
            .find(id)
            .select(PostRecord::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(record.map(GamePost::from))
    }

    /// Get a post with its media items.
    pub async fn get_with_media(&self, id: &str) -> StoreResult<Option<PostWithMedia>> {
        let mut conn = self.pool.get().await?;

        let Some(record) = game_posts::table
            .find(id)
            .select(PostRecord::as_select())
            .first(&mut conn)
            .await
            .optional()?
        else {
            return Ok(None);
        };

        let media: Vec<MediaRecord> = MediaRecord::belonging_to(&record)
            .order(media_items::created_at.asc())
            .select(MediaRecord::as_select())
            .load(&mut conn)
            .await?;

        Ok(Some(PostWithMedia {
            post: record.into(),
            media_items: media.into_iter().map(MediaItem::from).collect(),
        }))
    }

    /// Posts newest first, without media.
    pub async fn list(&self, limit: Option<i64>) -> StoreResult<Vec<GamePost>> {
        let mut conn = self.pool.get().await?;

        let mut query = game_posts::table
            .select(PostRecord::as_select())
            .order(game_posts::created_at.desc())
            .into_boxed();
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let records: Vec<PostRecord> = query.load(&mut conn).await?;
        Ok(records.into_iter().map(GamePost::from).collect())
    }

    /// Posts newest first, each with its media items.
    pub async fn list_with_media(&self, limit: Option<i64>) -> StoreResult<Vec<PostWithMedia>> {
        let mut conn = self.pool.get().await?;

        let mut query = game_posts::table
            .select(PostRecord::as_select())
            .order(game_posts::created_at.desc())
            .into_boxed();
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let posts: Vec<PostRecord> = query.load(&mut conn).await?;

        let media: Vec<MediaRecord> = MediaRecord::belonging_to(&posts)
            .order(media_items::created_at.asc())
            .select(MediaRecord::as_select())
            .load(&mut conn)
            .await?;
        let grouped = media.grouped_by(&posts);

        Ok(posts
            .into_iter()
            .zip(grouped)
            .map(|(post, media)| PostWithMedia {
                post: post.into(),
                media_items: media.into_iter().map(MediaItem::from).collect(),
            })
            .collect())
    }

    /// Delete a post. Media, comments and likes go with it.
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::delete(game_posts::table.find(id))
            .execute(&mut conn)
            .await?;

        Ok(rows > 0)
    }

    /// Total number of posts.
    pub async fn count(&self) -> StoreResult<i64> {
        let mut conn = self.pool.get().await?;

        let count: i64 = game_posts::table
            .count()
            .get_result(&mut conn)
            .await?;

        Ok(count)
    }

    /// Most recent post that records a playtime.
    pub async fn latest_with_playtime(&self) -> StoreResult<Option<GamePost>> {
        let mut conn = self.pool.get().await?;

        let record = game_posts::table
            .filter(game_posts::playtime.is_not_null())
            .order(game_posts::created_at.desc())
            .select(PostRecord::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(record.map(GamePost::from))
    }

    /// Every recorded playtime string.
    pub async fn playtimes(&self) -> StoreResult<Vec<String>> {
        let mut conn = self.pool.get().await?;

        let values: Vec<Option<String>> = game_posts::table
            .filter(game_posts::playtime.is_not_null())
            .select(game_posts::playtime)
            .load(&mut conn)
            .await?;

        Ok(values.into_iter().flatten().collect())
    }

    /// Latest post for each of the most recently written-about games.
    pub async fn recent_games(&self, limit: usize) -> StoreResult<Vec<GamePost>> {
        let posts = self.list(None).await?;
        let mut seen = HashSet::new();

        Ok(posts
            .into_iter()
            .filter(|post| seen.insert(post.game.clone()))
            .take(limit)
            .collect())
    }
}
