use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lumen_core::error::CoreError;
use lumen_gateway::GatewayError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`GatewayError`] and adds HTTP-specific variants.
/// Every variant renders as `{ "error": <message>, "code": <CODE> }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `lumen_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure from the upstream generation gateway.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

type ErrorParts = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(err) => classify_core_error(err),
            AppError::Gateway(err) => classify_gateway_error(err),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        (status, Json(json!({ "error": message, "code": code }))).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> ErrorParts {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::InsufficientCredits(msg) => (
            StatusCode::PAYMENT_REQUIRED,
            "INSUFFICIENT_CREDITS",
            msg.clone(),
        ),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

fn internal() -> ErrorParts {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Map a gateway failure to the status and message the editor expects.
///
/// Rate limiting and quota exhaustion keep their own statuses so the client
/// can tell them apart. Everything else is a generic 500; the detail is
/// logged, not returned.
fn classify_gateway_error(err: &GatewayError) -> ErrorParts {
    match err {
        GatewayError::RateLimited => (
            StatusCode::TOO_MANY_REQUESTS,
            "RATE_LIMITED",
            err.to_string(),
        ),
        GatewayError::PaymentRequired => (
            StatusCode::PAYMENT_REQUIRED,
            "PAYMENT_REQUIRED",
            err.to_string(),
        ),
        GatewayError::NoAsset => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "NO_ASSET",
            err.to_string(),
        ),
        GatewayError::Upstream { .. } | GatewayError::Request(_) | GatewayError::Decode(_) => {
            tracing::error!(error = %err, "Generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "GENERATION_FAILED",
                "AI generation failed".to_string(),
            )
        }
    }
}

/// Map a sqlx error to a response. Unique violations on `uq_*` constraints
/// become 409; anything unexpected is logged and sanitized.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorParts {
    if let sqlx::Error::RowNotFound = err {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }

    let unique_constraint = err
        .as_database_error()
        .filter(|db| db.is_unique_violation())
        .and_then(|db| db.constraint())
        .filter(|name| name.starts_with("uq_"));

    match unique_constraint {
        Some(constraint) => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {constraint}"),
        ),
        None => {
            tracing::error!(error = %err, "Database error");
            internal()
        }
    }
}
