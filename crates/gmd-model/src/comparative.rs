//! Records for comparing a recorded sex against free-text dataset columns.

use serde::{Deserialize, Serialize};

use crate::detection::Mismatch;
use crate::enums::{Priority, Sex};

/// Age assumed for dataset rows, which carry no age column.
pub const DEFAULT_COMPARATIVE_AGE: u32 = 50;

/// Which pair of columns an analysis compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    GenderVsFindings,
    GenderVsHumanImpression,
}

impl AnalysisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::GenderVsFindings => "gender_vs_findings",
            AnalysisType::GenderVsHumanImpression => "gender_vs_human_impression",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisType::GenderVsFindings => "Gender vs Findings",
            AnalysisType::GenderVsHumanImpression => "Gender vs Human Impression",
        }
    }
}

/// Columns selected for a comparative analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub gender: Option<Sex>,
    pub findings: Option<String>,
    pub human_impression: Option<String>,
}

impl ComparisonRequest {
    pub fn new(
        gender: Option<Sex>,
        findings: Option<String>,
        human_impression: Option<String>,
    ) -> Self {
        Self {
            gender,
            findings: findings.filter(|text| !text.trim().is_empty()),
            human_impression: human_impression.filter(|text| !text.trim().is_empty()),
        }
    }

    /// Number of columns that carry a value.
    pub fn selected_columns(&self) -> usize {
        usize::from(self.gender.is_some())
            + usize::from(non_blank(self.findings.as_deref()))
            + usize::from(non_blank(self.human_impression.as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> bool {
    value.is_some_and(|text| !text.trim().is_empty())
}

/// Outcome of one column-pair analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub mismatches: Vec<Mismatch>,
    pub priority: Priority,
    pub processing_time_ms: u64,
    pub keywords_checked: usize,
    pub exclusions_applied: usize,
    /// Keyword matches before exclusion heuristics ran.
    pub total_matches: usize,
    /// Keyword matches that survived the exclusion heuristics.
    pub filtered_matches: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
}

/// One analysis inside a [`ComparativeAnalysis`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(rename = "type")]
    pub analysis_type: AnalysisType,
    /// The free text that was analysed.
    pub data: String,
    pub results: AnalysisOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallSummary {
    pub total_analyses: usize,
    pub mismatches_found: usize,
    pub priority: Priority,
}

/// Full comparative analysis of one dataset row or ad-hoc request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparativeAnalysis {
    pub gender: Option<Sex>,
    pub findings: Option<String>,
    pub human_impression: Option<String>,
    pub analyses: Vec<Analysis>,
    pub overall_summary: OverallSummary,
}

impl ComparativeAnalysis {
    pub fn new(request: &ComparisonRequest) -> Self {
        Self {
            gender: request.gender,
            findings: request.findings.clone(),
            human_impression: request.human_impression.clone(),
            analyses: Vec::new(),
            overall_summary: OverallSummary::default(),
        }
    }

    /// Record an analysis and fold it into the overall summary.
    pub fn push(&mut self, analysis: Analysis) {
        let summary = &mut self.overall_summary;
        summary.total_analyses += 1;
        summary.mismatches_found += analysis.results.mismatches.len();
        summary.priority = summary.priority.max(analysis.results.priority);
        self.analyses.push(analysis);
    }

    pub fn total_processing_time_ms(&self) -> u64 {
        self.analyses
            .iter()
            .map(|a| a.results.processing_time_ms)
            .sum()
    }
}
