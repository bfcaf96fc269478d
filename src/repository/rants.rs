//! Quick rant repository.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::error::StoreResult;
use super::models::{NewRantRecord, RantRecord};
use super::parse_datetime;
use super::pool::SqlitePool;
use super::util::{format_timestamp, new_id};
use crate::models::{NewQuickRant, QuickRant, RantMood};
use crate::schema::quick_rants;

impl From<RantRecord> for QuickRant {
    fn from(record: RantRecord) -> Self {
        QuickRant {
            id: record.id,
            game: record.game,
            content: record.content,
            mood: RantMood::from_str(&record.mood).unwrap_or(RantMood::Neutral),
            created_at: parse_datetime(&record.created_at),
        }
    }
}

#[derive(Clone)]
pub struct RantRepository {
    pool: SqlitePool,
}

impl RantRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, draft: &NewQuickRant) -> StoreResult<QuickRant> {
        let mood = draft.validate()?;
        let mut conn = self.pool.get().await?;

        let rant = QuickRant {
            id: new_id(),
            game: draft.game.trim().to_string(),
            content: draft.content.clone(),
            mood,
            created_at: Utc::now(),
        };
        let created_at = format_timestamp(&rant.created_at);

        diesel::insert_into(quick_rants::table)
            .values(&NewRantRecord {
                id: &rant.id,
                game: &rant.game,
                content: &rant.content,
                mood: rant.mood.as_str(),
                created_at: &created_at,
            })
            .execute(&mut conn)
            .await?;

        Ok(rant)
    }

    /// Rants newest first.
    pub async fn list(&self, limit: Option<i64>) -> StoreResult<Vec<QuickRant>> {
        let mut conn = self.pool.get().await?;

        let mut query = quick_rants::table
            .select(RantRecord::as_select())
            .order(quick_rants::created_at.desc())
            .into_boxed();
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let records: Vec<RantRecord> = query.load(&mut conn).await?;
        Ok(records.into_iter().map(QuickRant::from).collect())
    }

    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::delete(quick_rants::table.find(id))
            .execute(&mut conn)
            .await?;

        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{test_context, StoreError};

    fn rant(game: &str, mood: &str) -> NewQuickRant {
        NewQuickRant {
            game: game.to_string(),
            content: "why is this boss so hard".to_string(),
            mood: mood.to_string(),
        }
    }

    #[tokio::test]
    async fn test_rants() {
        let (ctx, _dir) = test_context().await;
        let repo = ctx.rants();

        let first = repo.create(&rant("Cuphead", "angry")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        repo.create(&rant("Stardew Valley", "happy")).await.unwrap();

        let listed = repo.list(None).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].game, "Stardew Valley");
        assert_eq!(listed[1].mood, RantMood::Angry);
        assert_eq!(repo.list(Some(1)).await.unwrap().len(), 1);

        assert!(repo.delete(&first.id).await.unwrap());
        assert!(!repo.delete(&first.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_rant_mood_validated() {
        let (ctx, _dir) = test_context().await;
        let err = ctx.rants().create(&rant("Cuphead", "furious")).await.unwrap_err();
        assert!(matches!(err, StoreError::ValidationFailed(_)));
    }
}
