//! Ground-truth dataset of recorded sex alongside report findings and
//! human-written impressions.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use gmd_model::Sex;
use serde::Serialize;

use crate::csv_utils::read_rows;
use crate::error::{CatalogError, Result};

/// Characters kept in a choice label before it is truncated.
pub const LABEL_MAX_CHARS: usize = 100;

/// One complete dataset row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetRecord {
    pub gender: String,
    pub findings: String,
    pub human_impression: String,
}

impl DatasetRecord {
    /// Recorded sex, when the raw value is recognizable.
    pub fn sex(&self) -> Option<Sex> {
        self.gender.parse().ok()
    }
}

/// A selectable value with a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            label: truncate_label(value),
        }
    }
}

/// Distinct values of a dataset, ready for selection lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetOverview {
    pub genders: Vec<String>,
    pub findings: Vec<Choice>,
    pub human_impressions: Vec<Choice>,
    pub total_records: usize,
}

#[derive(Debug, Clone, Default)]
pub struct GtDataset {
    records: Vec<DatasetRecord>,
}

impl GtDataset {
    /// Parse the dataset from CSV. Rows with any blank column are dropped.
    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self> {
        let (columns, rows) = read_rows(reader, source_name)?;
        let gender_i = Some(columns.required("gender")?);
        let findings_i = Some(columns.required("findings")?);
        let impression_i = Some(columns.required("human_impression")?);

        let mut records = Vec::with_capacity(rows.len());
        let mut dropped = 0usize;
        for row in rows {
            let gender = row.non_empty(gender_i);
            let findings = row.non_empty(findings_i);
            let human_impression = row.non_empty(impression_i);
            match (gender, findings, human_impression) {
                (Some(gender), Some(findings), Some(human_impression)) => {
                    records.push(DatasetRecord {
                        gender,
                        findings,
                        human_impression,
                    });
                }
                _ => dropped += 1,
            }
        }

        if dropped > 0 {
            tracing::debug!(source = source_name, dropped, "Incomplete dataset rows dropped");
        }
        Ok(Self { records })
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CatalogError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, &path.display().to_string())
    }

    pub fn records(&self) -> &[DatasetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn overview(&self) -> DatasetOverview {
        let mut genders: Vec<String> = Vec::new();
        for record in &self.records {
            if !genders.contains(&record.gender) {
                genders.push(record.gender.clone());
            }
        }
        DatasetOverview {
            genders,
            findings: self
                .records
                .iter()
                .map(|r| Choice::new(&r.findings))
                .collect(),
            human_impressions: self
                .records
                .iter()
                .map(|r| Choice::new(&r.human_impression))
                .collect(),
            total_records: self.records.len(),
        }
    }
}

/// Truncate to [`LABEL_MAX_CHARS`] characters, marking the cut with `...`.
pub fn truncate_label(text: &str) -> String {
    match text.char_indices().nth(LABEL_MAX_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short"), "short");
        let exact = "a".repeat(LABEL_MAX_CHARS);
        assert_eq!(truncate_label(&exact), exact);
        let long = "é".repeat(LABEL_MAX_CHARS + 5);
        let label = truncate_label(&long);
        assert!(label.ends_with("..."));
        assert_eq!(label.chars().count(), LABEL_MAX_CHARS + 3);
    }

    #[test]
    fn test_incomplete_rows_dropped() {
        let input = "gender,findings,human_impression\n\
                     Male,Normal prostate.,No acute findings.\n\
                     Female,,Normal.\n\
                     F,Normal uterus.,Unremarkable pelvis.\n";
        let dataset = GtDataset::from_reader(input.as_bytes(), "inline").unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[1].sex(), Some(Sex::Female));

        let overview = dataset.overview();
        assert_eq!(overview.genders, vec!["Male", "F"]);
        assert_eq!(overview.total_records, 2);
        assert_eq!(overview.findings[0].label, "Normal prostate.");
    }
}
