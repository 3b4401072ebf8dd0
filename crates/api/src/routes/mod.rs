pub mod auth;
pub mod credits;
pub mod generation;
pub mod health;
pub mod history;
pub mod marketplace;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                 create account (public)
/// /auth/login                  login (public)
/// /auth/refresh                refresh (public)
/// /auth/logout                 logout (requires auth)
/// /auth/me                     current user (requires auth)
///
/// /credits                     balance (requires auth)
///
/// /generate                    generate image or video (requires auth)
/// /classify                    classify a prompt (requires auth)
///
/// /history                     caller's generations (requires auth)
///
/// /marketplace                 list (public), create (requires auth)
/// /marketplace/{id}            get (public)
/// /marketplace/{id}/use        use preset (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes.
        .nest("/auth", auth::router())
        // Credit balance.
        .merge(credits::router())
        // Generation and classification.
        .merge(generation::router())
        // Generation history.
        .merge(history::router())
        // Prompt preset marketplace.
        .nest("/marketplace", marketplace::router())
}
