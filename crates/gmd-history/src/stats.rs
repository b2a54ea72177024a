//! Aggregate statistics over recent detection log entries.

use chrono::{DateTime, Utc};
use gmd_model::{Priority, Sex};
use serde::Serialize;

use crate::log::LogEntry;

/// Entries considered by [`Statistics`].
pub const STATS_WINDOW: usize = 100;

/// Entries listed in [`Statistics::recent_activity`].
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentActivity {
    pub id: u64,
    pub patient_sex: Sex,
    pub patient_age: u32,
    pub mismatches_count: usize,
    pub processing_time: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub total_reports: usize,
    pub total_alerts: usize,
    pub avg_processing_time: f64,
    pub high_priority_alerts: usize,
    pub medium_priority_alerts: usize,
    pub female_patients: usize,
    pub male_patients: usize,
    pub unknown_gender_patients: usize,
    pub alerts_per_report: f64,
    pub recent_activity: Vec<RecentActivity>,
}

impl Statistics {
    /// Reduce `entries`, newest first. Only the first [`STATS_WINDOW`]
    /// entries count.
    pub fn from_recent(entries: &[LogEntry]) -> Self {
        let window = &entries[..entries.len().min(STATS_WINDOW)];
        if window.is_empty() {
            return Self::default();
        }

        let count_priority = |priority: Priority| -> usize {
            window
                .iter()
                .flat_map(|entry| &entry.mismatches)
                .filter(|m| m.priority == priority)
                .count()
        };
        let count_sex =
            |sex: Sex| -> usize { window.iter().filter(|e| e.patient_sex == sex).count() };

        let total_reports = window.len();
        let total_alerts: usize = window.iter().map(|e| e.mismatches.len()).sum();
        let total_time: u64 = window.iter().map(|e| e.processing_time_ms).sum();

        Self {
            total_reports,
            total_alerts,
            avg_processing_time: total_time as f64 / total_reports as f64,
            high_priority_alerts: count_priority(Priority::High),
            medium_priority_alerts: count_priority(Priority::Medium),
            female_patients: count_sex(Sex::Female),
            male_patients: count_sex(Sex::Male),
            unknown_gender_patients: count_sex(Sex::Unknown),
            alerts_per_report: total_alerts as f64 / total_reports as f64,
            recent_activity: window
                .iter()
                .take(RECENT_ACTIVITY_LIMIT)
                .map(|entry| RecentActivity {
                    id: entry.id,
                    patient_sex: entry.patient_sex,
                    patient_age: entry.patient_age,
                    mismatches_count: entry.mismatches.len(),
                    processing_time: entry.processing_time_ms,
                    created_at: entry.created_at,
                })
                .collect(),
        }
    }
}
