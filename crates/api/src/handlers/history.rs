//! Handler for the caller's generation history.

use axum::extract::{Query, State};
use axum::Json;
use lumen_db::models::history::HistoryEntry;
use lumen_db::repositories::HistoryRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_HISTORY_LIMIT: i64 = 50;
const MAX_HISTORY_LIMIT: i64 = 200;

/// One page of history plus the caller's total entry count.
#[derive(Debug, Serialize)]
pub struct HistoryPage {
    pub items: Vec<HistoryEntry>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// GET /api/v1/history
///
/// The caller's generations, newest first.
pub async fn list_history(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<HistoryPage>>> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let items = HistoryRepo::list_for_user(&state.pool, auth_user.user_id, limit, offset).await?;
    let total = HistoryRepo::count_for_user(&state.pool, auth_user.user_id).await?;

    Ok(Json(DataResponse {
        data: HistoryPage {
            items,
            total,
            limit,
            offset,
        },
    }))
}
