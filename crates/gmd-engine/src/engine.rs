//! The detection pipeline: select, match, filter, classify, assemble.

use std::time::Instant;

use gmd_model::{
    CatalogSnapshot, ContextType, DetectionOptions, DetectionResult, Keyword, PatientDescriptor,
};
use tracing::{debug, info_span};

use crate::assembler::{assemble, skipped};
use crate::error::Result;
use crate::exclusion::ExclusionFilter;
use crate::matcher::KeywordMatcher;
use crate::selector;

/// A detection result together with the bookkeeping behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub result: DetectionResult,
    /// Keywords matched before exclusions ran.
    pub total_matches: usize,
    /// Enabled exclusion rules in the snapshot.
    pub exclusions_applied: usize,
    /// Exclusion heuristics that found a trigger in the text.
    pub triggered: Vec<ContextType>,
}

/// Detection engine bound to one catalog snapshot and one set of options.
///
/// Keyword and exclusion patterns are compiled once in [`DetectionEngine::new`].
/// Detection itself holds no mutable state, so an engine can be shared across
/// threads and reused for any number of reports.
#[derive(Debug, Clone)]
pub struct DetectionEngine {
    snapshot: CatalogSnapshot,
    options: DetectionOptions,
    matcher: KeywordMatcher,
    filter: ExclusionFilter,
}

impl DetectionEngine {
    pub fn new(snapshot: CatalogSnapshot, options: DetectionOptions) -> Result<Self> {
        let matcher = KeywordMatcher::new(snapshot.keywords());
        let filter = ExclusionFilter::new(&options)?;
        debug!(
            keywords = snapshot.keyword_count(),
            exclusions = snapshot.exclusion_count(),
            scheme = %options.scheme,
            "Detection engine ready"
        );
        Ok(Self {
            snapshot,
            options,
            matcher,
            filter,
        })
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    pub fn options(&self) -> &DetectionOptions {
        &self.options
    }

    /// Keywords that would be checked for `patient`.
    pub fn candidates(&self, patient: &PatientDescriptor) -> Vec<&Keyword> {
        selector::select(patient, &self.snapshot, self.options.scheme)
    }

    /// Check `text` for wording inconsistent with `patient`.
    pub fn detect(&self, text: &str, patient: &PatientDescriptor) -> DetectionResult {
        self.evaluate(text, patient).result
    }

    /// Like [`DetectionEngine::detect`], also reporting match and exclusion counts.
    pub fn evaluate(&self, text: &str, patient: &PatientDescriptor) -> Evaluation {
        let started = Instant::now();
        let span = info_span!("detect", sex = %patient.sex, age = patient.age);
        let _guard = span.enter();

        if !patient.sex.is_known() {
            debug!("Detection skipped for unknown sex");
            return Evaluation {
                result: skipped(started.elapsed()),
                total_matches: 0,
                exclusions_applied: 0,
                triggered: Vec::new(),
            };
        }

        let candidates: Vec<(usize, &Keyword)> = self
            .snapshot
            .keywords()
            .iter()
            .enumerate()
            .filter(|(_, keyword)| selector::applies(patient, keyword, self.options.scheme))
            .collect();
        let keywords_checked = candidates.len();

        let matches = self
            .matcher
            .find(text, candidates, self.options.context_radius);
        let total_matches = matches.len();

        let filtered = self.filter.apply(
            text,
            matches,
            &self.snapshot,
            self.options.context_radius,
        );
        let result = assemble(
            filtered.surviving,
            patient,
            self.options.scheme,
            keywords_checked,
            started.elapsed(),
        );

        debug!(
            candidates = keywords_checked,
            matches = total_matches,
            mismatches = result.mismatches.len(),
            "Detection complete"
        );
        Evaluation {
            result,
            total_matches,
            exclusions_applied: self.snapshot.exclusion_count(),
            triggered: filtered.triggered,
        }
    }
}
