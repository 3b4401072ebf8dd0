//! Bearer-token session extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use lumen_core::error::CoreError;
use lumen_core::types::DbId;
use lumen_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The acting user, resolved per request from `Authorization: Bearer <jwt>`.
///
/// Handlers that need a session take this as a parameter. A missing or
/// invalid token, or a token whose user no longer exists, rejects the
/// request with 401 before the handler runs. A deactivated account gets 403.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// The user's database id (from `claims.sub`).
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            unauthorized("Invalid or expired token")
        })?;

        match UserRepo::find_by_id(&state.pool, claims.sub).await? {
            Some(user) if user.is_active => Ok(AuthUser { user_id: user.id }),
            Some(user) => {
                tracing::info!(user_id = user.id, "Rejected token for deactivated account");
                Err(AppError::Core(CoreError::Forbidden(
                    "Account is deactivated".into(),
                )))
            }
            None => {
                tracing::info!(user_id = claims.sub, "Rejected token for deleted account");
                Err(unauthorized("Invalid or expired token"))
            }
        }
    }
}

/// Pull the raw token out of the `Authorization` header.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Err(unauthorized("Missing Authorization header"));
    };

    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("Expected Authorization: Bearer <token>"))
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}
