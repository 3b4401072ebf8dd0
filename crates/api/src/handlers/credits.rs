//! Handler for the caller's credit balance.

use axum::extract::State;
use axum::Json;
use lumen_db::repositories::CreditRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Balance as shown in the editor header.
#[derive(Debug, Serialize)]
pub struct CreditsResponse {
    pub free_credits: i32,
    pub paid_credits: i32,
    pub total_credits: i64,
}

/// GET /api/v1/credits
///
/// The caller's balance. Created with the default free allowance on first
/// access.
pub async fn get_credits(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<CreditsResponse>>> {
    let row = CreditRepo::get_or_create(
        &state.pool,
        auth_user.user_id,
        state.config.default_free_credits,
    )
    .await?;
    let balance = row.balance();

    Ok(Json(DataResponse {
        data: CreditsResponse {
            free_credits: balance.free_credits,
            paid_credits: balance.paid_credits,
            total_credits: balance.total(),
        },
    }))
}
