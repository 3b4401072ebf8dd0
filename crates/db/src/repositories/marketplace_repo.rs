//! Repository for the `marketplace_products` table.

use lumen_core::marketplace::ListingSort;
use lumen_core::types::DbId;
use sqlx::PgPool;

use crate::models::marketplace::{CreateMarketplaceProduct, MarketplaceProduct};

const COLUMNS: &str = "id, creator_id, title, description, category, prompt_template, \
     preview_image_url, price, rating, downloads, is_published, created_at, updated_at";

/// Provides create/read operations for marketplace listings.
pub struct MarketplaceRepo;

impl MarketplaceRepo {
    /// Insert a new listing, returning the created row. Listings are
    /// published unless the input says otherwise.
    pub async fn create(
        pool: &PgPool,
        creator_id: DbId,
        input: &CreateMarketplaceProduct,
    ) -> Result<MarketplaceProduct, sqlx::Error> {
        let query = format!(
            "INSERT INTO marketplace_products \
                (creator_id, title, description, category, prompt_template, \
                 preview_image_url, price, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarketplaceProduct>(&query)
            .bind(creator_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.prompt_template)
            .bind(&input.preview_image_url)
            .bind(input.price)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    /// Find a published listing by ID.
    pub async fn find_published(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MarketplaceProduct>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM marketplace_products WHERE id = $1 AND is_published = true"
        );
        sqlx::query_as::<_, MarketplaceProduct>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List published listings, optionally filtered by category.
    pub async fn list_published(
        pool: &PgPool,
        category: Option<&str>,
        sort: ListingSort,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MarketplaceProduct>, sqlx::Error> {
        let order_clause = match sort {
            ListingSort::Popular => "downloads DESC, id DESC",
            ListingSort::Rating => "rating DESC, downloads DESC",
            ListingSort::Recent => "created_at DESC, id DESC",
        };

        let query = format!(
            "SELECT {COLUMNS} FROM marketplace_products \
             WHERE is_published = true \
               AND ($1::TEXT IS NULL OR category = $1) \
             ORDER BY {order_clause} \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, MarketplaceProduct>(&query)
            .bind(category)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Atomically increment the download count of a published listing.
    /// Returns the updated row, or `None` if no published listing matched.
    pub async fn increment_downloads(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MarketplaceProduct>, sqlx::Error> {
        let query = format!(
            "UPDATE marketplace_products SET downloads = downloads + 1 \
             WHERE id = $1 AND is_published = true \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarketplaceProduct>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
