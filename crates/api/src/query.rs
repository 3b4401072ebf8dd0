//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Handlers clamp the values before they reach the repository layer.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /marketplace`.
#[derive(Debug, Default, Deserialize)]
pub struct MarketplaceListParams {
    /// Restrict to one category.
    pub category: Option<String>,
    /// `popular` (default), `rating` or `recent`.
    pub sort_by: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
