//! Repository for the `user_credits` table.

use lumen_core::types::DbId;
use sqlx::PgPool;

use crate::models::credits::UserCredits;

const COLUMNS: &str = "user_id, free_credits, paid_credits, created_at, updated_at";

/// Credit balance reads and mutations.
pub struct CreditRepo;

impl CreditRepo {
    /// Find the balance row for a user, if one exists.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserCredits>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_credits WHERE user_id = $1");
        sqlx::query_as::<_, UserCredits>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Return the user's balance, creating it with `default_free` free credits
    /// and no paid credits when it does not exist yet.
    ///
    /// Concurrent first accesses are safe: the insert is a no-op on conflict.
    pub async fn get_or_create(
        pool: &PgPool,
        user_id: DbId,
        default_free: i32,
    ) -> Result<UserCredits, sqlx::Error> {
        let inserted = sqlx::query(
            "INSERT INTO user_credits (user_id, free_credits, paid_credits)
             VALUES ($1, $2, 0)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(default_free)
        .execute(pool)
        .await?;

        if inserted.rows_affected() > 0 {
            tracing::info!(user_id, free_credits = default_free, "Created credit balance");
        }

        Self::find_by_user(pool, user_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Deduct one credit in a single statement: from the free bucket when it
    /// is non-zero, otherwise from the paid bucket.
    ///
    /// Returns the updated row, or `None` when both buckets are already empty
    /// (or the row does not exist). Never drives a bucket negative.
    pub async fn deduct_one(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserCredits>, sqlx::Error> {
        let query = format!(
            "UPDATE user_credits SET
                free_credits = CASE WHEN free_credits > 0 THEN free_credits - 1 ELSE free_credits END,
                paid_credits = CASE WHEN free_credits > 0 THEN paid_credits ELSE paid_credits - 1 END
             WHERE user_id = $1
               AND (free_credits > 0 OR paid_credits > 0)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserCredits>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
