use gmd_catalog::load_default_catalog;
use gmd_engine::{DetectionEngine, select};
use gmd_model::{
    CatalogSnapshot, ContextType, DetectionOptions, DetectionResult, ExclusionRule,
    ExclusionScope, Keyword, KeywordCategory, PatientDescriptor, Priority, PriorityScheme,
    SexAssociation,
};

fn keyword(text: &str, sex: SexAssociation, category: KeywordCategory) -> Keyword {
    Keyword::new(text, sex, category)
}

fn all_rules() -> Vec<ExclusionRule> {
    ContextType::all()
        .iter()
        .copied()
        .map(ExclusionRule::new)
        .collect()
}

fn engine(keywords: Vec<Keyword>, rules: Vec<ExclusionRule>) -> DetectionEngine {
    DetectionEngine::new(
        CatalogSnapshot::from_records(keywords, rules),
        DetectionOptions::default(),
    )
    .expect("engine")
}

fn default_engine() -> DetectionEngine {
    let snapshot = load_default_catalog().expect("default catalog");
    DetectionEngine::new(snapshot, DetectionOptions::default()).expect("engine")
}

fn without_timing(mut result: DetectionResult) -> DetectionResult {
    result.processing_time_ms = 0;
    result
}

#[test]
fn pelvic_ultrasound_for_male_patient() {
    let engine = default_engine();
    let text = "Pelvic ultrasound shows normal uterus and ovaries.";
    let patient = PatientDescriptor::male(30);

    let result = engine.detect(text, &patient);
    let female_count = engine
        .snapshot()
        .keywords_for(SexAssociation::Female)
        .count();

    assert!(!result.skipped);
    assert_eq!(result.total_keywords_checked, female_count);
    assert_eq!(result.mismatches.len(), 2);
    for (mismatch, expected) in result.mismatches.iter().zip(["uterus", "ovaries"]) {
        assert_eq!(mismatch.keyword, expected);
        assert_eq!(mismatch.priority, Priority::High);
        assert_eq!(mismatch.category, KeywordCategory::BodyPart);
        assert!(mismatch.context.contains(expected));
    }

    insta::assert_json_snapshot!(without_timing(result), @r#"
    {
      "mismatches": [
        {
          "keyword": "uterus",
          "category": "body_part",
          "subcategory": "reproductive",
          "priority": "high",
          "context": "Pelvic ultrasound shows normal uterus and ovaries."
        },
        {
          "keyword": "ovaries",
          "category": "body_part",
          "subcategory": "reproductive",
          "priority": "high",
          "context": "Pelvic ultrasound shows normal uterus and ovaries."
        }
      ],
      "processing_time_ms": 0,
      "total_keywords_checked": 34
    }
    "#);
}

#[test]
fn provider_context_suppresses_mismatch() {
    let text = "The attending physician, a female, reviewed the male patient's prostate.";
    let patient = PatientDescriptor::female(45);
    let prostate = || {
        vec![keyword(
            "prostate",
            SexAssociation::Male,
            KeywordCategory::BodyPart,
        )]
    };

    let unfiltered = engine(prostate(), Vec::new()).detect(text, &patient);
    assert_eq!(unfiltered.mismatches.len(), 1);
    assert_eq!(unfiltered.mismatches[0].priority, Priority::High);

    let provider_only = vec![ExclusionRule::new(ContextType::HealthcareProvider)];
    let evaluation = engine(prostate(), provider_only).evaluate(text, &patient);
    assert!(evaluation.result.mismatches.is_empty());
    assert_eq!(evaluation.total_matches, 1);
    assert_eq!(evaluation.triggered, vec![ContextType::HealthcareProvider]);
}

#[test]
fn communication_context_suppresses_mismatch() {
    let text =
        "Findings discussed with the mother who said she agrees. Testicular ultrasound normal.";
    let keywords = vec![keyword(
        "testicular",
        SexAssociation::Male,
        KeywordCategory::BodyPart,
    )];
    let rules = vec![ExclusionRule::new(ContextType::Communication)];
    let result = engine(keywords, rules).detect(text, &PatientDescriptor::female(30));
    assert!(result.mismatches.is_empty());
}

#[test]
fn patient_reference_suppresses_mismatch() {
    let snapshot = load_default_catalog().expect("default catalog");
    let keywords = snapshot.keywords().to_vec();
    let patient = PatientDescriptor::male(40);
    let text = "Male outpatient. Uterus is anteverted.";

    let unfiltered = engine(keywords.clone(), Vec::new()).detect(text, &patient);
    assert_eq!(unfiltered.mismatches.len(), 1);
    assert_eq!(unfiltered.mismatches[0].keyword, "uterus");

    let reference_only = vec![ExclusionRule::new(ContextType::PatientReference)];
    let evaluation = engine(keywords.clone(), reference_only.clone()).evaluate(text, &patient);
    assert!(evaluation.result.mismatches.is_empty());
    assert_eq!(evaluation.total_matches, 1);
    assert_eq!(evaluation.triggered, vec![ContextType::PatientReference]);

    let unrelated =
        engine(keywords, reference_only).detect("Male. Uterus is anteverted.", &patient);
    assert_eq!(unrelated.mismatches.len(), 1);
}

#[test]
fn unknown_sex_is_skipped() {
    let engine = default_engine();
    let result = engine.detect(
        "Normal uterus and prostate.",
        &PatientDescriptor::unknown(40),
    );
    assert!(result.skipped);
    assert_eq!(result.skip_reason.as_deref(), Some("Unknown gender"));
    assert!(result.mismatches.is_empty());
    assert_eq!(result.total_keywords_checked, 0);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["processing_skipped"], true);
    assert_eq!(json["mismatches"], serde_json::json!([]));
}

#[test]
fn whole_word_matching() {
    let engine = engine(
        vec![keyword(
            "ovary",
            SexAssociation::Female,
            KeywordCategory::BodyPart,
        )],
        Vec::new(),
    );
    let patient = PatientDescriptor::male(40);
    assert_eq!(engine.detect("left ovary noted", &patient).mismatches.len(), 1);
    assert!(engine.detect("ovaryx", &patient).mismatches.is_empty());
    assert!(engine.detect("xovary", &patient).mismatches.is_empty());
    assert_eq!(engine.detect("LEFT OVARY.", &patient).mismatches.len(), 1);
}

#[test]
fn punctuated_keywords_match_literally() {
    let keywords = vec![
        keyword("o.b.", SexAssociation::Female, KeywordCategory::Procedure)
            .with_pregnancy_related(true),
        keyword("g/p", SexAssociation::Female, KeywordCategory::Finding)
            .with_pregnancy_related(true),
    ];
    let engine = engine(keywords, Vec::new());
    let patient = PatientDescriptor::male(40);

    let hits = engine.detect("Referred by O.B. clinic, G/P noted.", &patient);
    assert_eq!(hits.mismatches.len(), 2);
    assert_eq!(hits.mismatches[0].keyword, "o.b.");
    assert_eq!(hits.mismatches[1].keyword, "g/p");

    let misses = engine.detect("Job board, gap, gxp noted.", &patient);
    assert!(misses.mismatches.is_empty());
}

#[test]
fn pregnancy_keywords_respect_age_threshold() {
    let keywords = vec![
        keyword("uterus", SexAssociation::Female, KeywordCategory::BodyPart),
        keyword("gestational sac", SexAssociation::Female, KeywordCategory::Finding)
            .with_pregnancy_related(true),
    ];
    let engine = engine(keywords, Vec::new());
    let text = "Uterus is normal. No gestational sac.";

    let at_eight = engine.detect(text, &PatientDescriptor::male(8));
    assert_eq!(at_eight.total_keywords_checked, 2);
    assert_eq!(at_eight.mismatches.len(), 2);
    assert!(at_eight.mismatches.iter().all(|m| m.priority == Priority::High));

    let at_seven = engine.detect(text, &PatientDescriptor::male(7));
    assert_eq!(at_seven.total_keywords_checked, 1);
    assert_eq!(at_seven.mismatches.len(), 1);
    assert_eq!(at_seven.mismatches[0].keyword, "uterus");
    assert_eq!(at_seven.mismatches[0].priority, Priority::High);
}

#[test]
fn candidate_counts_for_default_catalog() {
    let snapshot = load_default_catalog().expect("default catalog");
    let female = snapshot.keywords_for(SexAssociation::Female).count();
    let male = snapshot.keywords_for(SexAssociation::Male).count();
    let female_non_pregnancy = snapshot
        .keywords_for(SexAssociation::Female)
        .filter(|k| !k.pregnancy_related)
        .count();

    let count = |patient: PatientDescriptor, scheme: PriorityScheme| {
        select(&patient, &snapshot, scheme).len()
    };
    let per_patient = PriorityScheme::PerPatient;
    assert_eq!(count(PatientDescriptor::female(30), per_patient), male);
    assert_eq!(count(PatientDescriptor::male(8), per_patient), female);
    assert_eq!(
        count(PatientDescriptor::male(7), per_patient),
        female_non_pregnancy
    );
    assert_eq!(count(PatientDescriptor::unknown(30), per_patient), 0);

    let comparative = PriorityScheme::Comparative;
    let pregnancy = snapshot
        .keywords()
        .iter()
        .filter(|k| k.pregnancy_related)
        .count();
    assert_eq!(count(PatientDescriptor::female(50), comparative), female + male);
    assert_eq!(count(PatientDescriptor::male(50), comparative), female + male);
    assert_eq!(
        count(PatientDescriptor::female(17), comparative),
        female + male - pregnancy
    );
    assert_eq!(count(PatientDescriptor::unknown(50), comparative), 0);
}

#[test]
fn repeated_calls_are_identical() {
    let engine = default_engine();
    let text = "Prostate is enlarged. PSA elevated. Prostate calcifications.";
    let patient = PatientDescriptor::female(61);

    let first = without_timing(engine.detect(text, &patient));
    let second = without_timing(engine.detect(text, &patient));
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(first.mismatches.len(), 2);
    assert_eq!(first.mismatches[0].occurrences, 2);
}

#[test]
fn context_stays_within_radius() {
    let engine = default_engine();
    let text = format!("{} prostate {}", "a".repeat(80), "b".repeat(80));
    let result = engine.detect(&text, &PatientDescriptor::female(50));
    let context = &result.mismatches[0].context;
    assert!(context.contains("prostate"));
    assert_eq!(context.chars().count(), 50 + "prostate".len() + 50);
}

#[test]
fn windowed_scope_keeps_unrelated_matches() {
    let text = format!(
        "Nurse said she would return. {} Uterus is normal.",
        "Unremarkable study. ".repeat(10)
    );
    let keywords = vec![keyword(
        "uterus",
        SexAssociation::Female,
        KeywordCategory::BodyPart,
    )];
    let patient = PatientDescriptor::male(40);

    let document = engine(keywords.clone(), all_rules()).detect(&text, &patient);
    assert!(document.mismatches.is_empty());

    let windowed = DetectionEngine::new(
        CatalogSnapshot::from_records(keywords, all_rules()),
        DetectionOptions::default().with_exclusion_scope(ExclusionScope::Windowed),
    )
    .expect("engine");
    let result = windowed.detect(&text, &patient);
    assert_eq!(result.mismatches.len(), 1);
}

#[test]
fn empty_catalog_yields_no_mismatches() {
    let engine = engine(Vec::new(), Vec::new());
    let result = engine.detect("Normal prostate.", &PatientDescriptor::female(30));
    assert!(result.mismatches.is_empty());
    assert_eq!(result.total_keywords_checked, 0);
    assert!(!result.skipped);
}
