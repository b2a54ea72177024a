//! Packaging of classified matches into a [`DetectionResult`].

use std::time::Duration;

use gmd_model::{
    DetectionResult, Mismatch, PatientDescriptor, PriorityScheme, UNKNOWN_SEX_SKIP_REASON,
};

use crate::matcher::RawMatch;
use crate::priority::classify;

/// Build the result for the surviving matches, in match order.
pub fn assemble(
    surviving: Vec<RawMatch<'_>>,
    patient: &PatientDescriptor,
    scheme: PriorityScheme,
    keywords_checked: usize,
    elapsed: Duration,
) -> DetectionResult {
    let mismatches = surviving
        .into_iter()
        .map(|raw| Mismatch {
            keyword: raw.keyword.text.clone(),
            category: raw.keyword.category.clone(),
            subcategory: raw.keyword.subcategory.clone(),
            priority: classify(raw.keyword, patient, scheme),
            context: raw.context,
            occurrences: raw.occurrences.len(),
        })
        .collect();

    DetectionResult {
        mismatches,
        processing_time_ms: millis(elapsed),
        total_keywords_checked: keywords_checked,
        skipped: false,
        skip_reason: None,
    }
}

/// The result for a patient of unknown sex.
pub fn skipped(elapsed: Duration) -> DetectionResult {
    DetectionResult::skipped(UNKNOWN_SEX_SKIP_REASON, millis(elapsed))
}

pub(crate) fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
