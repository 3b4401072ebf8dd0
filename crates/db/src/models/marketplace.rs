//! Marketplace listing models and DTOs.

use lumen_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `marketplace_products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MarketplaceProduct {
    pub id: DbId,
    pub creator_id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub prompt_template: String,
    pub preview_image_url: Option<String>,
    pub price: f64,
    pub rating: f64,
    pub downloads: i64,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMarketplaceProduct {
    pub title: String,
    pub description: String,
    pub category: String,
    pub prompt_template: String,
    pub preview_image_url: Option<String>,
    #[serde(default)]
    pub price: f64,
    pub is_published: Option<bool>,
}
