//! Comparison of a recorded sex against free-text dataset columns.

use gmd_model::{
    Analysis, AnalysisOutcome, AnalysisType, CatalogSnapshot, ComparativeAnalysis,
    ComparisonRequest, DEFAULT_COMPARATIVE_AGE, DetectionOptions, PatientDescriptor,
    PriorityScheme,
};

use crate::assembler::millis;
use crate::engine::DetectionEngine;
use crate::error::{AnalysisError, Result};

/// Minimum number of columns a comparison needs.
pub const MIN_SELECTED_COLUMNS: usize = 2;

/// Runs the engine in the comparative scheme over dataset columns.
#[derive(Debug, Clone)]
pub struct ComparativeAnalyzer {
    engine: DetectionEngine,
}

impl ComparativeAnalyzer {
    pub fn new(snapshot: CatalogSnapshot) -> Result<Self> {
        Self::with_options(snapshot, DetectionOptions::comparative())
    }

    /// Use `options`, always with the comparative priority scheme.
    pub fn with_options(snapshot: CatalogSnapshot, options: DetectionOptions) -> Result<Self> {
        let options = options.with_scheme(PriorityScheme::Comparative);
        Ok(Self {
            engine: DetectionEngine::new(snapshot, options)?,
        })
    }

    pub fn engine(&self) -> &DetectionEngine {
        &self.engine
    }

    /// Analyse each text column of `request` against its gender.
    ///
    /// Rows carry no age, so [`DEFAULT_COMPARATIVE_AGE`] is assumed.
    pub fn analyze(
        &self,
        request: &ComparisonRequest,
    ) -> std::result::Result<ComparativeAnalysis, AnalysisError> {
        let selected = request.selected_columns();
        if selected < MIN_SELECTED_COLUMNS {
            return Err(AnalysisError::TooFewColumns { selected });
        }

        let mut analysis = ComparativeAnalysis::new(request);
        if let Some(gender) = request.gender {
            let patient = PatientDescriptor::new(gender, DEFAULT_COMPARATIVE_AGE);
            let columns = [
                (AnalysisType::GenderVsFindings, request.findings.as_deref()),
                (
                    AnalysisType::GenderVsHumanImpression,
                    request.human_impression.as_deref(),
                ),
            ];
            for (analysis_type, text) in columns {
                if let Some(text) = text {
                    analysis.push(self.run(analysis_type, text, &patient));
                }
            }
        }

        tracing::debug!(
            analyses = analysis.overall_summary.total_analyses,
            mismatches = analysis.overall_summary.mismatches_found,
            priority = %analysis.overall_summary.priority,
            "Comparative analysis complete"
        );
        Ok(analysis)
    }

    fn run(
        &self,
        analysis_type: AnalysisType,
        text: &str,
        patient: &PatientDescriptor,
    ) -> Analysis {
        let started = std::time::Instant::now();
        let evaluation = self.engine.evaluate(text, patient);
        let result = evaluation.result;
        let priority = result.highest_priority();
        let filtered_matches = result.mismatches.len();

        Analysis {
            analysis_type,
            data: text.to_string(),
            results: AnalysisOutcome {
                mismatches: result.mismatches,
                priority,
                processing_time_ms: millis(started.elapsed()),
                keywords_checked: result.total_keywords_checked,
                exclusions_applied: evaluation.exclusions_applied,
                total_matches: evaluation.total_matches,
                filtered_matches,
                skip_reason: result.skip_reason,
            },
        }
    }
}
