//! Configuration options for a detection call.

use serde::{Deserialize, Serialize};

use crate::enums::PriorityScheme;

/// Characters of source text kept on each side of a match as context.
pub const DEFAULT_CONTEXT_RADIUS: usize = 50;

/// Characters inspected on each side of a sex-indicating term by the
/// patient-reference heuristic.
pub const DEFAULT_REFERENCE_RADIUS: usize = 100;

/// Maximum characters between the terms of the provider and communication
/// heuristics in per-patient mode.
pub const DEFAULT_GAP_CHARS: usize = 50;

/// How far an exclusion trigger reaches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExclusionScope {
    /// A trigger anywhere in the text suppresses every match.
    #[default]
    Document,
    /// A trigger only suppresses matches within `exclusion_radius` characters.
    Windowed,
}

/// Allowed distance between the terms of a multi-term heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapWindow {
    /// Up to this many characters on the same line.
    Chars(usize),
    /// Anything up to the end of the sentence (no period in between).
    Sentence,
}

impl Default for GapWindow {
    fn default() -> Self {
        GapWindow::Chars(DEFAULT_GAP_CHARS)
    }
}

/// Options for a detection call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionOptions {
    pub scheme: PriorityScheme,
    pub exclusion_scope: ExclusionScope,
    /// Reach of a trigger when the scope is [`ExclusionScope::Windowed`].
    pub exclusion_radius: usize,
    pub gap: GapWindow,
    pub context_radius: usize,
    pub reference_radius: usize,
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self::per_patient()
    }
}

impl DetectionOptions {
    /// Single report checked against the patient record.
    pub fn per_patient() -> Self {
        Self {
            scheme: PriorityScheme::PerPatient,
            exclusion_scope: ExclusionScope::Document,
            exclusion_radius: DEFAULT_REFERENCE_RADIUS,
            gap: GapWindow::Chars(DEFAULT_GAP_CHARS),
            context_radius: DEFAULT_CONTEXT_RADIUS,
            reference_radius: DEFAULT_REFERENCE_RADIUS,
        }
    }

    /// Dataset comparison: category-based priorities and sentence-bounded gaps.
    pub fn comparative() -> Self {
        Self {
            scheme: PriorityScheme::Comparative,
            gap: GapWindow::Sentence,
            ..Self::per_patient()
        }
    }

    #[must_use]
    pub fn with_scheme(mut self, scheme: PriorityScheme) -> Self {
        self.scheme = scheme;
        self
    }

    #[must_use]
    pub fn with_exclusion_scope(mut self, scope: ExclusionScope) -> Self {
        self.exclusion_scope = scope;
        self
    }

    #[must_use]
    pub fn with_exclusion_radius(mut self, radius: usize) -> Self {
        self.exclusion_radius = radius;
        self
    }

    #[must_use]
    pub fn with_gap(mut self, gap: GapWindow) -> Self {
        self.gap = gap;
        self
    }
}
