//! Gender mismatch detection for radiology report text.
//!
//! A call runs five stages in order:
//!
//! 1. [`selector`] picks the keywords to check for the patient's sex and age.
//! 2. [`matcher`] finds whole-word, case-insensitive literal occurrences.
//! 3. [`exclusion`] drops matches in staff, communication and relative contexts.
//! 4. [`priority`] assigns a severity per keyword.
//! 5. [`assembler`] packages the [`DetectionResult`](gmd_model::DetectionResult).
//!
//! [`DetectionEngine`] wires the stages together for one catalog snapshot;
//! [`ComparativeAnalyzer`] runs it over ground-truth dataset columns.

pub mod assembler;
pub mod comparative;
pub mod engine;
pub mod error;
pub mod exclusion;
pub mod matcher;
pub mod priority;
pub mod selector;

pub use comparative::{ComparativeAnalyzer, MIN_SELECTED_COLUMNS};
pub use engine::{DetectionEngine, Evaluation};
pub use error::{AnalysisError, EngineError, Result};
pub use exclusion::{ExclusionFilter, Trigger};
pub use matcher::{KeywordMatcher, LiteralPattern, RawMatch};
pub use priority::classify;
pub use selector::select;
