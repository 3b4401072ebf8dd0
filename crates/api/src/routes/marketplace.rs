//! Route definitions for the `/marketplace` resource.
//!
//! ```text
//! GET    /            list_products (?category=&sort_by=&limit=&offset=)
//! POST   /            create_product (requires auth)
//! GET    /{id}        get_product
//! POST   /{id}/use    use_product (requires auth)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::marketplace;
use crate::state::AppState;

/// Routes mounted at `/marketplace`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(marketplace::list_products).post(marketplace::create_product),
        )
        .route("/{id}", get(marketplace::get_product))
        .route("/{id}/use", post(marketplace::use_product))
}
