//! Command workflows: detection, comparison and dataset analysis.
//!
//! Each workflow takes an already-loaded catalog snapshot and optionally
//! records its result in a [`DetectionLog`].

use anyhow::{Context, Result};
use gmd_catalog::GtDataset;
use gmd_engine::{ComparativeAnalyzer, DetectionEngine};
use gmd_history::{DetectionLog, EntryDraft, LogEntry};
use gmd_model::{
    CatalogSnapshot, ComparativeAnalysis, ComparisonRequest, DetectionOptions, DetectionResult,
    PatientDescriptor, Priority, Sex,
};
use serde::Serialize;
use tracing::{debug, info, info_span, trace, warn};

use crate::logging::redact_value;

/// Result of checking a single report.
#[derive(Debug, Clone, Serialize)]
pub struct DetectOutcome {
    pub patient: PatientDescriptor,
    pub result: DetectionResult,
    /// Id of the log entry written for this detection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_id: Option<u64>,
}

/// Mismatch priorities across a dataset analysis, one count per row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub none: usize,
}

impl PriorityCounts {
    fn record(&mut self, priority: Priority) {
        match priority {
            Priority::High => self.high += 1,
            Priority::Medium => self.medium += 1,
            Priority::Low => self.low += 1,
            Priority::None => self.none += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetAnalysis {
    pub rows: Vec<ComparativeAnalysis>,
    pub priorities: PriorityCounts,
    pub mismatches_found: usize,
}

/// Check `text` against `patient`.
pub fn detect_report(
    snapshot: CatalogSnapshot,
    options: DetectionOptions,
    patient: PatientDescriptor,
    text: &str,
    log: Option<&DetectionLog>,
) -> Result<DetectOutcome> {
    let engine = DetectionEngine::new(snapshot, options).context("build detection engine")?;
    let result = engine.detect(text, &patient);
    info!(
        sex = %patient.sex,
        age = patient.age,
        mismatches = result.mismatches.len(),
        priority = %result.highest_priority(),
        time_ms = result.processing_time_ms,
        "Report checked"
    );
    for mismatch in &result.mismatches {
        trace!(
            keyword = %mismatch.keyword,
            priority = %mismatch.priority,
            context = redact_value(&mismatch.context),
            "Mismatch"
        );
    }

    let log_id = match log {
        Some(log) => Some(
            log.append(EntryDraft::from_detection(&patient, &result))
                .with_context(|| format!("append to {}", log.path().display()))?
                .id,
        ),
        None => None,
    };
    Ok(DetectOutcome {
        patient,
        result,
        log_id,
    })
}

/// Compare a recorded sex against findings and impression text.
pub fn compare_columns(
    snapshot: CatalogSnapshot,
    options: DetectionOptions,
    request: &ComparisonRequest,
    log: Option<&DetectionLog>,
) -> Result<ComparativeAnalysis> {
    let analyzer =
        ComparativeAnalyzer::with_options(snapshot, options).context("build detection engine")?;
    let analysis = analyzer.analyze(request)?;
    if let Some(log) = log {
        log_comparison(log, &analysis)?;
    }
    Ok(analysis)
}

/// Analyse every complete row of a ground-truth dataset.
///
/// Rows whose gender is not recognizable are analysed as unknown sex and
/// therefore skipped by the engine.
pub fn analyze_dataset(
    snapshot: CatalogSnapshot,
    options: DetectionOptions,
    dataset: &GtDataset,
    limit: Option<usize>,
    log: Option<&DetectionLog>,
) -> Result<DatasetAnalysis> {
    let analyzer =
        ComparativeAnalyzer::with_options(snapshot, options).context("build detection engine")?;
    let span = info_span!("dataset", records = dataset.len());
    let _guard = span.enter();

    let mut rows = Vec::new();
    let mut priorities = PriorityCounts::default();
    let mut mismatches_found = 0usize;
    for (index, record) in dataset
        .records()
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
    {
        let gender = record.sex().unwrap_or_else(|| {
            warn!(row = index + 1, gender = %record.gender, "Unrecognized gender");
            Sex::Unknown
        });
        let request = ComparisonRequest::new(
            Some(gender),
            Some(record.findings.clone()),
            Some(record.human_impression.clone()),
        );
        let analysis = analyzer
            .analyze(&request)
            .with_context(|| format!("analyze dataset row {}", index + 1))?;
        if let Some(log) = log {
            log_comparison(log, &analysis)?;
        }
        debug!(
            row = index + 1,
            mismatches = analysis.overall_summary.mismatches_found,
            priority = %analysis.overall_summary.priority,
            "Row analysed"
        );
        priorities.record(analysis.overall_summary.priority);
        mismatches_found += analysis.overall_summary.mismatches_found;
        rows.push(analysis);
    }

    info!(
        rows = rows.len(),
        mismatches = mismatches_found,
        high = priorities.high,
        "Dataset analysed"
    );
    Ok(DatasetAnalysis {
        rows,
        priorities,
        mismatches_found,
    })
}

fn log_comparison(log: &DetectionLog, analysis: &ComparativeAnalysis) -> Result<LogEntry> {
    log.append(EntryDraft::from_comparison(analysis))
        .with_context(|| format!("append to {}", log.path().display()))
}
