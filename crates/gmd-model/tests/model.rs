//! Serialization shape of the detection records.

use gmd_model::{
    DetectionOptions, DetectionResult, ExclusionScope, GapWindow, Keyword, KeywordCategory,
    Mismatch, PatientDescriptor, Priority, PriorityScheme, Sex, SexAssociation,
    UNKNOWN_SEX_SKIP_REASON,
};
use serde_json::json;

#[test]
fn detection_result_serializes_transport_fields() {
    let result = DetectionResult {
        mismatches: vec![Mismatch {
            keyword: "prostate".to_string(),
            category: KeywordCategory::BodyPart,
            subcategory: Some("reproductive".to_string()),
            priority: Priority::High,
            context: "The prostate is enlarged".to_string(),
            occurrences: 2,
        }],
        processing_time_ms: 4,
        total_keywords_checked: 18,
        skipped: false,
        skip_reason: None,
    };
    let value = serde_json::to_value(&result).expect("serialize result");
    assert_eq!(
        value,
        json!({
            "mismatches": [{
                "keyword": "prostate",
                "category": "body_part",
                "subcategory": "reproductive",
                "priority": "high",
                "context": "The prostate is enlarged"
            }],
            "processing_time_ms": 4,
            "total_keywords_checked": 18
        })
    );
}

#[test]
fn skipped_result_serializes_skip_fields() {
    let result = DetectionResult::skipped(UNKNOWN_SEX_SKIP_REASON, 0);
    let value = serde_json::to_value(&result).expect("serialize result");
    assert_eq!(value["processing_skipped"], json!(true));
    assert_eq!(value["skip_reason"], json!("Unknown gender"));
    assert_eq!(value["mismatches"], json!([]));
}

#[test]
fn skipped_result_round_trips() {
    let json = r#"{"mismatches":[],"processing_time_ms":0,"total_keywords_checked":0,
        "processing_skipped":true,"skip_reason":"Unknown gender"}"#;
    let result: DetectionResult = serde_json::from_str(json).expect("deserialize result");
    assert!(result.skipped);
    assert_eq!(result.skip_reason.as_deref(), Some(UNKNOWN_SEX_SKIP_REASON));
}

#[test]
fn legacy_capitalized_values_deserialize() {
    let sex: Sex = serde_json::from_str("\"Female\"").expect("sex");
    assert_eq!(sex, Sex::Female);
    let priority: Priority = serde_json::from_str("\"Medium\"").expect("priority");
    assert_eq!(priority, Priority::Medium);
    let category: KeywordCategory = serde_json::from_str("\"lab_tests\"").expect("category");
    assert_eq!(category, KeywordCategory::LabTest);
}

#[test]
fn keyword_builder_defaults() {
    let keyword = Keyword::new("uterus", SexAssociation::Female, KeywordCategory::BodyPart);
    assert!(keyword.enabled);
    assert!(!keyword.pregnancy_related);
    assert!(keyword.subcategory.is_none());

    let keyword = keyword
        .with_subcategory("pelvis")
        .with_pregnancy_related(true);
    assert_eq!(keyword.subcategory.as_deref(), Some("pelvis"));
    assert!(keyword.pregnancy_related);
}

#[test]
fn patient_pregnancy_threshold_is_eight() {
    assert!(PatientDescriptor::male(7).is_below_pregnancy_age());
    assert!(!PatientDescriptor::male(8).is_below_pregnancy_age());
    assert!(PatientDescriptor::female(0).is_below_pregnancy_age());
}

#[test]
fn options_presets() {
    let per_patient = DetectionOptions::default();
    assert_eq!(per_patient.scheme, PriorityScheme::PerPatient);
    assert_eq!(per_patient.exclusion_scope, ExclusionScope::Document);
    assert_eq!(per_patient.gap, GapWindow::Chars(50));
    assert_eq!(per_patient.context_radius, 50);
    assert_eq!(per_patient.reference_radius, 100);

    let comparative = DetectionOptions::comparative();
    assert_eq!(comparative.scheme, PriorityScheme::Comparative);
    assert_eq!(comparative.gap, GapWindow::Sentence);
}

#[test]
fn options_deserialize_with_defaults() {
    let options: DetectionOptions =
        serde_json::from_str(r#"{"exclusion_scope":"windowed","gap":"sentence"}"#)
            .expect("deserialize options");
    assert_eq!(options.exclusion_scope, ExclusionScope::Windowed);
    assert_eq!(options.gap, GapWindow::Sentence);
    assert_eq!(options.scheme, PriorityScheme::PerPatient);
    assert_eq!(options.exclusion_radius, 100);
}
