//! Marketplace listing validation and listing-query options.
//!
//! A listing is a shareable prompt template with a category, an optional
//! preview image, and a price (0 means free).

use crate::error::CoreError;

/* --------------------------------------------------------------------------
   Categories
   -------------------------------------------------------------------------- */

pub const CATEGORY_LIGHTING: &str = "lighting";
pub const CATEGORY_STYLE: &str = "style";
pub const CATEGORY_BACKGROUND: &str = "background";
pub const CATEGORY_EFFECTS: &str = "effects";
pub const CATEGORY_COLOR: &str = "color";
pub const CATEGORY_PORTRAIT: &str = "portrait";
pub const CATEGORY_LANDSCAPE: &str = "landscape";

/// All valid category values.
pub const VALID_CATEGORIES: &[&str] = &[
    CATEGORY_LIGHTING,
    CATEGORY_STYLE,
    CATEGORY_BACKGROUND,
    CATEGORY_EFFECTS,
    CATEGORY_COLOR,
    CATEGORY_PORTRAIT,
    CATEGORY_LANDSCAPE,
];

/* --------------------------------------------------------------------------
   Limits
   -------------------------------------------------------------------------- */

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 5000;
pub const MAX_PROMPT_TEMPLATE_LEN: usize = 5000;

/// Default page size for the marketplace listing.
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/* --------------------------------------------------------------------------
   Sorting
   -------------------------------------------------------------------------- */

/// Sort order for the marketplace listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListingSort {
    /// Most downloads first.
    #[default]
    Popular,
    /// Highest rating first.
    Rating,
    /// Newest first.
    Recent,
}

impl ListingSort {
    /// Parse a `sort_by` query value. Unknown or missing values use
    /// [`ListingSort::Popular`].
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("rating") => ListingSort::Rating,
            Some("recent") => ListingSort::Recent,
            _ => ListingSort::Popular,
        }
    }
}

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/* --------------------------------------------------------------------------
   Validation
   -------------------------------------------------------------------------- */

fn validate_text(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    let len = value.chars().count();
    if len > max {
        return Err(CoreError::Validation(format!(
            "{field} too long: {len} chars (max {max})"
        )));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    validate_text("Title", title, MAX_TITLE_LEN)
}

pub fn validate_description(description: &str) -> Result<(), CoreError> {
    validate_text("Description", description, MAX_DESCRIPTION_LEN)
}

pub fn validate_prompt_template(template: &str) -> Result<(), CoreError> {
    validate_text("Prompt template", template, MAX_PROMPT_TEMPLATE_LEN)
}

/// Validate that `category` is one of the allowed values.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid category '{category}'. Must be one of: {}",
            VALID_CATEGORIES.join(", ")
        )))
    }
}

/// Validate a price: finite and non-negative.
pub fn validate_price(price: f64) -> Result<(), CoreError> {
    if !price.is_finite() || price < 0.0 {
        return Err(CoreError::Validation(format!(
            "Price must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}

/// Validate a preview image reference: a data URI or an http(s) URL.
pub fn validate_preview_image(reference: &str) -> Result<(), CoreError> {
    if reference.starts_with("data:image/")
        || reference.starts_with("https://")
        || reference.starts_with("http://")
    {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Preview image must be an image data URI or an http(s) URL".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn categories() {
        for c in VALID_CATEGORIES {
            assert!(validate_category(c).is_ok());
        }
        assert_matches!(validate_category("memes"), Err(CoreError::Validation(_)));
        assert_matches!(validate_category("Lighting"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn free_and_paid_prices_accepted() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(4.99).is_ok());
    }

    #[test]
    fn negative_or_nan_price_rejected() {
        assert_matches!(validate_price(-1.0), Err(CoreError::Validation(_)));
        assert_matches!(validate_price(f64::NAN), Err(CoreError::Validation(_)));
        assert_matches!(validate_price(f64::INFINITY), Err(CoreError::Validation(_)));
    }

    #[test]
    fn text_fields() {
        assert!(validate_title("Epic Sunset Transformation").is_ok());
        assert_matches!(validate_title("   "), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_description(&"d".repeat(MAX_DESCRIPTION_LEN + 1)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(validate_prompt_template(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn preview_image_references() {
        assert!(validate_preview_image("data:image/png;base64,AAAA").is_ok());
        assert!(validate_preview_image("https://cdn.example.com/p.webp").is_ok());
        assert_matches!(
            validate_preview_image("ftp://x/y.png"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn sort_parsing_defaults_to_popular() {
        assert_eq!(ListingSort::parse(None), ListingSort::Popular);
        assert_eq!(ListingSort::parse(Some("bogus")), ListingSort::Popular);
        assert_eq!(ListingSort::parse(Some("rating")), ListingSort::Rating);
        assert_eq!(ListingSort::parse(Some("recent")), ListingSort::Recent);
    }

    #[test]
    fn paging_is_clamped() {
        assert_eq!(clamp_limit(None), DEFAULT_PAGE_SIZE);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(10_000)), MAX_PAGE_SIZE);
        assert_eq!(clamp_offset(Some(-5)), 0);
        assert_eq!(clamp_offset(Some(20)), 20);
    }
}
