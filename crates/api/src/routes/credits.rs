use axum::routing::get;
use axum::Router;

use crate::handlers::credits;
use crate::state::AppState;

/// `GET /credits` (requires auth).
pub fn router() -> Router<AppState> {
    Router::new().route("/credits", get(credits::get_credits))
}
