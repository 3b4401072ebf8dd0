use axum::routing::get;
use axum::Router;

use crate::handlers::history;
use crate::state::AppState;

/// `GET /history?limit=&offset=` (requires auth).
pub fn router() -> Router<AppState> {
    Router::new().route("/history", get(history::list_history))
}
