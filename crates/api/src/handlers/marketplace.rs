//! Handlers for the `/marketplace` resource (prompt preset listings).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use lumen_core::error::CoreError;
use lumen_core::marketplace::{
    clamp_limit, clamp_offset, validate_category, validate_description, validate_preview_image,
    validate_price, validate_prompt_template, validate_title, ListingSort,
};
use lumen_core::types::DbId;
use lumen_db::models::marketplace::{CreateMarketplaceProduct, MarketplaceProduct};
use lumen_db::repositories::MarketplaceRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::MarketplaceListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `POST /marketplace/{id}/use`.
#[derive(Debug, Serialize)]
pub struct UsePresetResponse {
    pub id: DbId,
    pub title: String,
    pub prompt_template: String,
    pub downloads: i64,
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /api/v1/marketplace
///
/// Published listings. `sort_by` is `popular` (default), `rating` or
/// `recent`; `category` filters; `limit` defaults to 10.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<MarketplaceListParams>,
) -> AppResult<Json<DataResponse<Vec<MarketplaceProduct>>>> {
    let category = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    if let Some(category) = category {
        validate_category(category)?;
    }

    let products = MarketplaceRepo::list_published(
        &state.pool,
        category,
        ListingSort::parse(params.sort_by.as_deref()),
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;

    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/marketplace/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MarketplaceProduct>>> {
    let product = MarketplaceRepo::find_published(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MarketplaceProduct",
            id,
        }))?;

    Ok(Json(DataResponse { data: product }))
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// POST /api/v1/marketplace
///
/// Publish a new listing owned by the caller. Returns 201.
pub async fn create_product(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateMarketplaceProduct>,
) -> AppResult<(StatusCode, Json<DataResponse<MarketplaceProduct>>)> {
    validate_title(&input.title)?;
    validate_description(&input.description)?;
    validate_category(&input.category)?;
    validate_prompt_template(&input.prompt_template)?;
    validate_price(input.price)?;
    if let Some(preview) = input.preview_image_url.as_deref() {
        validate_preview_image(preview)?;
    }

    let product = MarketplaceRepo::create(&state.pool, auth_user.user_id, &input).await?;

    tracing::info!(
        user_id = auth_user.user_id,
        product_id = product.id,
        category = %product.category,
        "Marketplace listing created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// POST /api/v1/marketplace/{id}/use
///
/// Count a download and hand back the prompt template.
pub async fn use_product(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UsePresetResponse>>> {
    let product = MarketplaceRepo::increment_downloads(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MarketplaceProduct",
            id,
        }))?;

    tracing::debug!(
        user_id = auth_user.user_id,
        product_id = id,
        downloads = product.downloads,
        "Marketplace preset used"
    );

    Ok(Json(DataResponse {
        data: UsePresetResponse {
            id: product.id,
            title: product.title,
            prompt_template: product.prompt_template,
            downloads: product.downloads,
        },
    }))
}
