//! Repository for the append-only `edit_history` table.

use lumen_core::types::DbId;
use sqlx::PgPool;

use crate::models::history::{CreateHistoryEntry, HistoryEntry};

const COLUMNS: &str = "id, user_id, prompt, image_url, original_image_url, media_type, \
     task_type, confidence, generation_time_ms, model_used, resolution, created_at";

/// Inserts and lists history entries. There is no update or delete.
pub struct HistoryRepo;

impl HistoryRepo {
    /// Append one entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateHistoryEntry,
    ) -> Result<HistoryEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO edit_history \
                (user_id, prompt, image_url, original_image_url, media_type, task_type, \
                 confidence, generation_time_ms, model_used, resolution) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HistoryEntry>(&query)
            .bind(input.user_id)
            .bind(&input.prompt)
            .bind(&input.image_url)
            .bind(&input.original_image_url)
            .bind(&input.media_type)
            .bind(&input.task_type)
            .bind(input.confidence)
            .bind(input.generation_time_ms)
            .bind(&input.model_used)
            .bind(&input.resolution)
            .fetch_one(pool)
            .await
    }

    /// List a user's entries, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<HistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM edit_history \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, HistoryEntry>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count a user's entries.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM edit_history WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
