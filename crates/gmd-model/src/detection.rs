//! Detection output records.

use serde::{Deserialize, Serialize};

use crate::enums::{KeywordCategory, Priority};

/// Skip reason reported when the patient sex is indeterminate.
pub const UNKNOWN_SEX_SKIP_REASON: &str = "Unknown gender";

/// A keyword found in the report that is inconsistent with the patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub keyword: String,
    pub category: KeywordCategory,
    pub subcategory: Option<String>,
    pub priority: Priority,
    /// Source text around the first occurrence (±50 characters).
    pub context: String,
    /// Whole-word occurrences of the keyword. Kept for statistics only.
    #[serde(skip)]
    pub occurrences: usize,
}

/// Terminal output of one detection call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub mismatches: Vec<Mismatch>,
    pub processing_time_ms: u64,
    pub total_keywords_checked: usize,
    #[serde(
        rename = "processing_skipped",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub skipped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
}

impl DetectionResult {
    /// The result shape for a call that never reached the detection stages.
    pub fn skipped(reason: impl Into<String>, processing_time_ms: u64) -> Self {
        Self {
            mismatches: Vec::new(),
            processing_time_ms,
            total_keywords_checked: 0,
            skipped: true,
            skip_reason: Some(reason.into()),
        }
    }

    /// Most severe priority among the mismatches ([`Priority::None`] when empty).
    pub fn highest_priority(&self) -> Priority {
        self.mismatches
            .iter()
            .map(|m| m.priority)
            .max()
            .unwrap_or_default()
    }

    pub fn count_priority(&self, priority: Priority) -> usize {
        self.mismatches
            .iter()
            .filter(|m| m.priority == priority)
            .count()
    }

    pub fn has_high_priority(&self) -> bool {
        self.count_priority(Priority::High) > 0
    }
}
