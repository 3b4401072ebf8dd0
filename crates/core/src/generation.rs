//! Generation request defaults and validation.
//!
//! Requests carry a prompt, an optional source image as a base64 data URI,
//! a `WxH` resolution, a quality label, and the desired media type.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults and limits
// ---------------------------------------------------------------------------

/// Resolution used when the request omits one.
pub const DEFAULT_RESOLUTION: &str = "1024x1024";

/// Quality used when the request omits one.
pub const DEFAULT_QUALITY: &str = "balanced";

pub const QUALITY_DRAFT: &str = "draft";
pub const QUALITY_BALANCED: &str = "balanced";
pub const QUALITY_HIGH: &str = "high";

/// All accepted quality labels.
pub const VALID_QUALITIES: &[&str] = &[QUALITY_DRAFT, QUALITY_BALANCED, QUALITY_HIGH];

/// Smallest accepted side length in pixels.
pub const MIN_DIMENSION: u32 = 64;
/// Largest accepted side length in pixels.
pub const MAX_DIMENSION: u32 = 4096;

/// Maximum prompt length in characters.
pub const MAX_PROMPT_LEN: usize = 4000;

/// Maximum decoded size of a source image (10 MiB).
pub const MAX_SOURCE_IMAGE_BYTES: usize = 10 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Media type
// ---------------------------------------------------------------------------

/// Requested output modality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a prompt: not blank and within the length limit.
///
/// Returns the prompt trimmed of surrounding whitespace.
pub fn validate_prompt(prompt: &str) -> Result<&str, CoreError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Please enter a prompt to generate an image.".to_string(),
        ));
    }
    let len = trimmed.chars().count();
    if len > MAX_PROMPT_LEN {
        return Err(CoreError::Validation(format!(
            "Prompt too long: {len} chars (max {MAX_PROMPT_LEN})"
        )));
    }
    Ok(trimmed)
}

/// Parse and validate a `WxH` resolution string.
pub fn parse_resolution(resolution: &str) -> Result<(u32, u32), CoreError> {
    let invalid = || {
        CoreError::Validation(format!(
            "Invalid resolution '{resolution}'. Expected WIDTHxHEIGHT, e.g. {DEFAULT_RESOLUTION}"
        ))
    };

    let (w, h) = resolution.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: u32 = w.trim().parse().map_err(|_| invalid())?;
    let height: u32 = h.trim().parse().map_err(|_| invalid())?;

    for side in [width, height] {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&side) {
            return Err(CoreError::Validation(format!(
                "Resolution sides must be between {MIN_DIMENSION} and {MAX_DIMENSION}, got {width}x{height}"
            )));
        }
    }
    Ok((width, height))
}

/// Validate that `quality` is one of the accepted labels.
pub fn validate_quality(quality: &str) -> Result<(), CoreError> {
    if VALID_QUALITIES.contains(&quality) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid quality '{quality}'. Must be one of: {}",
            VALID_QUALITIES.join(", ")
        )))
    }
}

/// Validate a source image supplied as a `data:image/...;base64,` URI.
///
/// Returns the decoded payload size in bytes.
pub fn validate_image_data_uri(data_uri: &str) -> Result<usize, CoreError> {
    let rest = data_uri.strip_prefix("data:").ok_or_else(|| {
        CoreError::Validation("Source image must be a data URI".to_string())
    })?;

    let (header, payload) = rest.split_once(',').ok_or_else(|| {
        CoreError::Validation("Malformed data URI: missing ',' separator".to_string())
    })?;

    let mime = header.strip_suffix(";base64").ok_or_else(|| {
        CoreError::Validation("Source image data URI must be base64-encoded".to_string())
    })?;
    if !mime.starts_with("image/") {
        return Err(CoreError::Validation(format!(
            "Please select an image file (got '{mime}')"
        )));
    }

    // Reject oversized payloads before decoding them.
    if payload.len() / 4 * 3 > MAX_SOURCE_IMAGE_BYTES + 3 {
        return Err(source_image_too_large());
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| CoreError::Validation(format!("Invalid base64 image data: {e}")))?;
    if bytes.is_empty() {
        return Err(CoreError::Validation("Source image is empty".to_string()));
    }
    if bytes.len() > MAX_SOURCE_IMAGE_BYTES {
        return Err(source_image_too_large());
    }
    Ok(bytes.len())
}

fn source_image_too_large() -> CoreError {
    CoreError::Validation(format!(
        "Source image exceeds the {} MB limit",
        MAX_SOURCE_IMAGE_BYTES / (1024 * 1024)
    ))
}
