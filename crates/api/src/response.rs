//! Shared response envelope types for API handlers.
//!
//! API responses use a `{ "data": ... }` envelope, with the exception of
//! `POST /generate` whose body is consumed directly by the editor.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
