//! JSON-lines detection log.
//!
//! One entry per line, appended in creation order. Ids are sequential,
//! starting at 1.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use gmd_model::{
    ComparativeAnalysis, DEFAULT_COMPARATIVE_AGE, DetectionResult, Mismatch, PatientDescriptor,
    Priority, Sex,
};
use serde::{Deserialize, Serialize};

use crate::error::{HistoryError, Result};

/// A stored detection.
///
/// Report text is never stored; only the patient descriptor and the
/// mismatches found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub patient_sex: Sex,
    pub patient_age: u32,
    pub mismatches: Vec<Mismatch>,
    pub processing_time_ms: u64,
    #[serde(default)]
    pub processing_skipped: bool,
    #[serde(default)]
    pub alert_priority: Priority,
}

/// Entry contents before an id and timestamp are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub patient_sex: Sex,
    pub patient_age: u32,
    pub mismatches: Vec<Mismatch>,
    pub processing_time_ms: u64,
    pub processing_skipped: bool,
    pub alert_priority: Priority,
}

impl EntryDraft {
    pub fn from_detection(patient: &PatientDescriptor, result: &DetectionResult) -> Self {
        Self {
            patient_sex: patient.sex,
            patient_age: patient.age,
            mismatches: result.mismatches.clone(),
            processing_time_ms: result.processing_time_ms,
            processing_skipped: result.skipped,
            alert_priority: result.highest_priority(),
        }
    }

    /// A comparative analysis is logged with its mismatches across all
    /// analyses and the overall priority.
    pub fn from_comparison(analysis: &ComparativeAnalysis) -> Self {
        Self {
            patient_sex: analysis.gender.unwrap_or(Sex::Unknown),
            patient_age: DEFAULT_COMPARATIVE_AGE,
            mismatches: analysis
                .analyses
                .iter()
                .flat_map(|a| a.results.mismatches.iter().cloned())
                .collect(),
            processing_time_ms: analysis.total_processing_time_ms(),
            processing_skipped: analysis
                .analyses
                .iter()
                .any(|a| a.results.skip_reason.is_some()),
            alert_priority: analysis.overall_summary.priority,
        }
    }
}

/// Only the id of a stored entry, for resuming the sequence.
#[derive(Deserialize)]
struct StoredId {
    id: u64,
}

/// Append-only detection log stored at a file path.
///
/// The newest id is read from the file on the first append and cached
/// afterwards, so appends do not rescan the log.
#[derive(Debug)]
pub struct DetectionLog {
    path: PathBuf,
    last_id: Mutex<Option<u64>>,
}

impl DetectionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_id: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries in file order. A missing log file reads as empty.
    pub fn read_all(&self) -> Result<Vec<LogEntry>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error("read", e)),
        };

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| self.io_error("read", e))?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|source| HistoryError::InvalidEntry {
                path: self.path.clone(),
                line: index + 1,
                source,
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }

    /// The `limit` newest entries, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        let mut entries = self.read_all()?;
        entries.reverse();
        entries.truncate(limit);
        Ok(entries)
    }

    /// Append an entry stamped with the current time.
    pub fn append(&self, draft: EntryDraft) -> Result<LogEntry> {
        self.append_at(draft, Utc::now())
    }

    /// Append an entry with an explicit timestamp.
    pub fn append_at(&self, draft: EntryDraft, created_at: DateTime<Utc>) -> Result<LogEntry> {
        let mut last_id = self.last_id.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = match *last_id {
            Some(id) => id,
            None => self.stored_last_id()?,
        };
        let next_id = previous + 1;

        let entry = LogEntry {
            id: next_id,
            created_at,
            patient_sex: draft.patient_sex,
            patient_age: draft.patient_age,
            mismatches: draft.mismatches,
            processing_time_ms: draft.processing_time_ms,
            processing_skipped: draft.processing_skipped,
            alert_priority: draft.alert_priority,
        };
        let mut line = serde_json::to_string(&entry)
            .map_err(|source| HistoryError::Serialization { source })?;
        line.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error("create directory for", e))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error("open", e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| self.io_error("write", e))?;
        *last_id = Some(next_id);

        tracing::debug!(
            id = entry.id,
            path = %self.path.display(),
            mismatches = entry.mismatches.len(),
            "Detection logged"
        );
        Ok(entry)
    }

    /// Id of the last entry in the file, or 0 when there is none.
    fn stored_last_id(&self) -> Result<u64> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(self.io_error("read", e)),
        };

        let mut last: Option<(usize, String)> = None;
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| self.io_error("read", e))?;
            if !line.trim().is_empty() {
                last = Some((index, line));
            }
        }
        let Some((index, line)) = last else {
            return Ok(0);
        };
        let stored: StoredId =
            serde_json::from_str(&line).map_err(|source| HistoryError::InvalidEntry {
                path: self.path.clone(),
                line: index + 1,
                source,
            })?;
        Ok(stored.id)
    }

    fn io_error(&self, operation: &'static str, source: std::io::Error) -> HistoryError {
        HistoryError::Io {
            operation,
            path: self.path.clone(),
            source,
        }
    }
}
