//! Keyword-based prompt classification.
//!
//! Maps a free-text prompt to one coarse [`TaskType`] by checking an ordered
//! table of keyword sets. The first category with any keyword contained in
//! the lower-cased prompt wins; nothing matching falls back to
//! [`TaskType::GeneralGeneration`].
//!
//! The confidence value attached to a classification is a placeholder drawn
//! uniformly from `[0.85, 1.0)` on every call. It is display decoration only
//! and carries no information about the match.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the placeholder confidence range.
pub const MIN_CONFIDENCE: f64 = 0.85;
/// Upper bound (exclusive) of the placeholder confidence range.
pub const MAX_CONFIDENCE: f64 = 1.0;

/// Coarse editing intent inferred from a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    LightingAdjustment,
    BackgroundRemoval,
    StyleTransfer,
    ObjectModification,
    GeneralGeneration,
}

impl TaskType {
    /// Wire/database label for this task type.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskType::LightingAdjustment => "lighting_adjustment",
            TaskType::BackgroundRemoval => "background_removal",
            TaskType::StyleTransfer => "style_transfer",
            TaskType::ObjectModification => "object_modification",
            TaskType::GeneralGeneration => "general_generation",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification rules in priority order. Earlier entries win.
const RULES: &[(TaskType, &[&str])] = &[
    (
        TaskType::LightingAdjustment,
        &["light", "bright", "dark", "exposure", "morning", "sunset", "shadow"],
    ),
    (
        TaskType::BackgroundRemoval,
        &["remove", "background", "delete", "cut out"],
    ),
    (
        TaskType::StyleTransfer,
        &["style", "artistic", "effect", "filter", "vintage", "cinematic"],
    ),
    (
        TaskType::ObjectModification,
        &["add", "change", "modify", "transform"],
    ),
];

/// Result of classifying a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub task_type: TaskType,
    /// Placeholder in `[0.85, 1.0)`; see the module docs.
    pub confidence: f64,
}

/// Classify a prompt by keyword containment. Deterministic.
pub fn classify(prompt: &str) -> TaskType {
    let lower = prompt.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(task_type, _)| *task_type)
        .unwrap_or(TaskType::GeneralGeneration)
}

/// Draw a fresh placeholder confidence in `[0.85, 1.0)`.
pub fn sample_confidence() -> f64 {
    rand::rng().random_range(MIN_CONFIDENCE..MAX_CONFIDENCE)
}

/// Classify a prompt and attach a placeholder confidence.
pub fn classify_with_confidence(prompt: &str) -> Classification {
    Classification {
        task_type: classify(prompt),
        confidence: sample_confidence(),
    }
}
