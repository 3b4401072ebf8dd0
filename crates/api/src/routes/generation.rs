//! Route definitions for generation and prompt classification.

use axum::routing::post;
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// ```text
/// POST /generate  -> generate (requires auth)
/// POST /classify  -> classify (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generation::generate))
        .route("/classify", post(generation::classify))
}
