//! Data model for gender mismatch detection in radiology reports.

pub mod catalog;
pub mod comparative;
pub mod detection;
pub mod enums;
pub mod error;
pub mod keyword;
pub mod options;
pub mod patient;

pub use catalog::CatalogSnapshot;
pub use comparative::{
    Analysis, AnalysisOutcome, AnalysisType, ComparativeAnalysis, ComparisonRequest,
    DEFAULT_COMPARATIVE_AGE, OverallSummary,
};
pub use detection::{DetectionResult, Mismatch, UNKNOWN_SEX_SKIP_REASON};
pub use enums::{ContextType, KeywordCategory, Priority, PriorityScheme, Sex, SexAssociation};
pub use error::{ModelError, Result};
pub use keyword::{ExclusionRule, Keyword};
pub use options::{DetectionOptions, ExclusionScope, GapWindow};
pub use patient::{ADULT_AGE, PREGNANCY_AGE_THRESHOLD, PatientDescriptor};

#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch(keyword: &str, priority: Priority) -> Mismatch {
        Mismatch {
            keyword: keyword.to_string(),
            category: KeywordCategory::BodyPart,
            subcategory: None,
            priority,
            context: format!("normal {keyword}"),
            occurrences: 1,
        }
    }

    #[test]
    fn detection_result_priority_counts() {
        let result = DetectionResult {
            mismatches: vec![
                mismatch("uterus", Priority::High),
                mismatch("ovaries", Priority::High),
                mismatch("pap smear", Priority::Medium),
            ],
            processing_time_ms: 2,
            total_keywords_checked: 12,
            skipped: false,
            skip_reason: None,
        };
        assert_eq!(result.count_priority(Priority::High), 2);
        assert_eq!(result.count_priority(Priority::Medium), 1);
        assert_eq!(result.highest_priority(), Priority::High);
        assert!(result.has_high_priority());
    }

    #[test]
    fn comparative_summary_tracks_highest_priority() {
        let request = ComparisonRequest::new(
            Some(Sex::Male),
            Some("Normal uterus.".to_string()),
            Some("   ".to_string()),
        );
        assert_eq!(request.selected_columns(), 2);
        assert!(request.human_impression.is_none());

        let mut analysis = ComparativeAnalysis::new(&request);
        analysis.push(Analysis {
            analysis_type: AnalysisType::GenderVsFindings,
            data: "Normal uterus.".to_string(),
            results: AnalysisOutcome {
                mismatches: vec![mismatch("uterus", Priority::High)],
                priority: Priority::High,
                processing_time_ms: 3,
                keywords_checked: 20,
                exclusions_applied: 3,
                total_matches: 1,
                filtered_matches: 1,
                skip_reason: None,
            },
        });
        assert_eq!(analysis.overall_summary.total_analyses, 1);
        assert_eq!(analysis.overall_summary.mismatches_found, 1);
        assert_eq!(analysis.overall_summary.priority, Priority::High);
        assert_eq!(analysis.total_processing_time_ms(), 3);
    }
}
