//! Detection history for the gender mismatch detector.
//!
//! Detections are appended to a JSON-lines log; [`Statistics`] reduces the
//! most recent entries into dashboard figures.

pub mod error;
pub mod log;
pub mod stats;

pub use error::{HistoryError, Result};
pub use log::{DetectionLog, EntryDraft, LogEntry};
pub use stats::{RECENT_ACTIVITY_LIMIT, RecentActivity, STATS_WINDOW, Statistics};

/// Statistics over the newest [`STATS_WINDOW`] entries of `log`.
pub fn statistics(log: &DetectionLog) -> Result<Statistics> {
    let recent = log.recent(STATS_WINDOW)?;
    Ok(Statistics::from_recent(&recent))
}
