//! Handlers for prompt classification and generation.
//!
//! A generation runs four sequential steps inside one request:
//!
//! 1. validate the request and check the credit balance (no network call on
//!    failure),
//! 2. classify the prompt,
//! 3. call the gateway once,
//! 4. deduct one credit and append a history entry.
//!
//! Step 4 only runs after a successful gateway call. Its two writes are
//! independent and best-effort: failures are logged and the generated asset
//! is returned regardless.

use axum::extract::State;
use axum::Json;
use lumen_core::classifier::{classify_with_confidence, Classification};
use lumen_core::credits::{ensure_can_generate, CreditBalance};
use lumen_core::generation::{
    parse_resolution, validate_image_data_uri, validate_prompt, validate_quality, MediaType,
    DEFAULT_QUALITY, DEFAULT_RESOLUTION,
};
use lumen_core::types::DbId;
use lumen_db::models::history::CreateHistoryEntry;
use lumen_db::repositories::{CreditRepo, HistoryRepo};
use lumen_gateway::{GeneratedAsset, GenerationInput};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Absent is treated as blank so it fails validation with a JSON error.
    #[serde(default)]
    pub prompt: String,
    /// Optional source image as a `data:image/...;base64,` URI.
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub media_type: MediaType,
}

/// Successful generation body. Exactly one of `image_url` / `video_url` is
/// present, matching the requested media type.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub generation_time_ms: i64,
    pub model_used: String,
    pub task_type: String,
    pub confidence: f64,
}

/// Request body for `POST /classify`.
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub prompt: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/classify
///
/// Classify a prompt without generating anything. The confidence is a
/// display placeholder.
pub async fn classify(
    _auth_user: AuthUser,
    Json(input): Json<ClassifyRequest>,
) -> AppResult<Json<DataResponse<Classification>>> {
    let prompt = validate_prompt(&input.prompt)?;
    Ok(Json(DataResponse {
        data: classify_with_confidence(prompt),
    }))
}

/// POST /api/v1/generate
///
/// Generate an image or video from a prompt and optional source image.
pub async fn generate(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<GenerateRequest>,
) -> AppResult<Json<GenerateResponse>> {
    let user_id = auth_user.user_id;

    // 1. Validation and credit gate.
    let prompt = validate_prompt(&input.prompt)?.to_string();

    let resolution = input
        .resolution
        .unwrap_or_else(|| DEFAULT_RESOLUTION.to_string());
    parse_resolution(&resolution)?;

    let quality = input.quality.unwrap_or_else(|| DEFAULT_QUALITY.to_string());
    validate_quality(&quality)?;

    if let Some(image) = input.image_base64.as_deref() {
        validate_image_data_uri(image)?;
    }

    let balance =
        CreditRepo::get_or_create(&state.pool, user_id, state.config.default_free_credits)
            .await?
            .balance();
    ensure_can_generate(&balance)?;

    // 2. Classification.
    let classification = classify_with_confidence(&prompt);

    tracing::info!(
        user_id,
        task_type = %classification.task_type,
        media_type = %input.media_type,
        resolution = %resolution,
        quality = %quality,
        has_source_image = input.image_base64.is_some(),
        "Starting generation"
    );

    // 3. Gateway call. Any failure here returns before the ledger is touched.
    let generation_input = GenerationInput {
        prompt,
        image_data_uri: input.image_base64,
        media_type: input.media_type,
    };
    let asset = state.gateway.generate(&generation_input).await?;

    tracing::info!(
        user_id,
        generation_time_ms = asset.generation_time_ms,
        "Generation succeeded"
    );

    // 4. Ledger update.
    record_generation(
        &state,
        user_id,
        balance,
        &generation_input,
        &asset,
        &classification,
        &resolution,
    )
    .await;

    let (image_url, video_url) = match input.media_type {
        MediaType::Image => (Some(asset.url), None),
        MediaType::Video => (None, Some(asset.url)),
    };

    Ok(Json(GenerateResponse {
        image_url,
        video_url,
        generation_time_ms: asset.generation_time_ms,
        model_used: asset.model_used,
        task_type: classification.task_type.to_string(),
        confidence: classification.confidence,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Deduct one credit and append the history entry. Never fails the request.
async fn record_generation(
    state: &AppState,
    user_id: DbId,
    gated: CreditBalance,
    input: &GenerationInput,
    asset: &GeneratedAsset,
    classification: &Classification,
    resolution: &str,
) {
    match CreditRepo::deduct_one(&state.pool, user_id).await {
        Ok(Some(after)) => {
            tracing::debug!(
                user_id,
                bucket = %gated.next_bucket(),
                free_credits = after.free_credits,
                paid_credits = after.paid_credits,
                "Deducted generation credit"
            );
            if gated.deduct_one() != Some(after.balance()) {
                tracing::info!(user_id, "Balance changed while generating");
            }
        }
        Ok(None) => tracing::warn!(
            user_id,
            "Balance was empty after generation, no credit deducted"
        ),
        Err(e) => tracing::error!(user_id, error = %e, "Failed to deduct generation credit"),
    }

    let entry = CreateHistoryEntry {
        user_id,
        prompt: input.prompt.clone(),
        image_url: asset.url.clone(),
        original_image_url: input.image_data_uri.clone(),
        media_type: input.media_type.to_string(),
        task_type: classification.task_type.to_string(),
        confidence: classification.confidence,
        generation_time_ms: asset.generation_time_ms,
        model_used: asset.model_used.clone(),
        resolution: resolution.to_string(),
    };

    if let Err(e) = HistoryRepo::create(&state.pool, &entry).await {
        tracing::error!(user_id, error = %e, "Failed to record generation history");
    }
}
