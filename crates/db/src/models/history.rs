//! Generation history models. Rows are append-only.

use lumen_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `edit_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HistoryEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub prompt: String,
    pub image_url: String,
    pub original_image_url: Option<String>,
    pub media_type: String,
    pub task_type: String,
    pub confidence: f64,
    pub generation_time_ms: i64,
    pub model_used: String,
    pub resolution: String,
    pub created_at: Timestamp,
}

/// DTO for appending a history entry after a successful generation.
#[derive(Debug, Clone)]
pub struct CreateHistoryEntry {
    pub user_id: DbId,
    pub prompt: String,
    pub image_url: String,
    pub original_image_url: Option<String>,
    pub media_type: String,
    pub task_type: String,
    pub confidence: f64,
    pub generation_time_ms: i64,
    pub model_used: String,
    pub resolution: String,
}
