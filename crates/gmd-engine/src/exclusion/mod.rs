//! Exclusion heuristics.
//!
//! Each heuristic recognizes a benign context in which a sex-indicating word
//! describes somebody other than the patient's anatomy. A heuristic runs only
//! when the catalog snapshot holds an enabled rule of its context type.

mod communication;
mod patient_reference;
mod provider;

use std::ops::Range;

use gmd_model::{CatalogSnapshot, ContextType, DetectionOptions, ExclusionScope, GapWindow};
use regex::Regex;

use crate::error::{EngineError, Result};
use crate::matcher::{RawMatch, char_distance};

pub(crate) const SEX_TERMS: &str = "he|she|his|her|him|male|female|woman|man|girl|boy";

type PatternBuilder = fn(GapWindow) -> std::result::Result<Regex, regex::Error>;

fn gap_fragment(gap: GapWindow) -> String {
    match gap {
        GapWindow::Chars(max) => format!(".{{0,{max}}}"),
        GapWindow::Sentence => "[^.]*".to_string(),
    }
}

/// A span of text recognized by one heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub context_type: ContextType,
    pub span: Range<usize>,
}

/// Matches left after exclusions, plus the context types that fired.
#[derive(Debug, Clone, Default)]
pub struct Filtered<'a> {
    pub surviving: Vec<RawMatch<'a>>,
    pub triggered: Vec<ContextType>,
}

/// The three heuristics compiled for one set of detection options.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    provider: Regex,
    communication: Regex,
    scope: ExclusionScope,
    exclusion_radius: usize,
    reference_radius: usize,
}

impl ExclusionFilter {
    pub fn new(options: &DetectionOptions) -> Result<Self> {
        let compile = |context_type: ContextType, build: PatternBuilder| {
            build(options.gap).map_err(|source| EngineError::ExclusionPattern {
                context_type,
                source,
            })
        };
        Ok(Self {
            provider: compile(ContextType::HealthcareProvider, provider::pattern)?,
            communication: compile(ContextType::Communication, communication::pattern)?,
            scope: options.exclusion_scope,
            exclusion_radius: options.exclusion_radius,
            reference_radius: options.reference_radius,
        })
    }

    /// Every trigger of the heuristics enabled in `snapshot`, grouped by
    /// heuristic in the order provider, communication, patient reference.
    pub fn triggers(&self, text: &str, snapshot: &CatalogSnapshot) -> Vec<Trigger> {
        let mut triggers = Vec::new();
        let mut push = |context_type: ContextType, spans: Vec<Range<usize>>| {
            triggers.extend(spans.into_iter().map(|span| Trigger { context_type, span }));
        };

        if snapshot.is_excluded_context(ContextType::HealthcareProvider) {
            push(ContextType::HealthcareProvider, find_spans(&self.provider, text));
        }
        if snapshot.is_excluded_context(ContextType::Communication) {
            push(ContextType::Communication, find_spans(&self.communication, text));
        }
        if snapshot.is_excluded_context(ContextType::PatientReference) {
            push(
                ContextType::PatientReference,
                patient_reference::triggers(text, self.reference_radius),
            );
        }
        triggers
    }

    /// Drop matches that sit in an excluded context.
    ///
    /// With [`ExclusionScope::Document`] any trigger suppresses every match.
    /// With [`ExclusionScope::Windowed`] a trigger only suppresses occurrences
    /// within `exclusion_radius` characters of it, and a keyword survives while
    /// at least one of its occurrences does.
    pub fn apply<'a>(
        &self,
        text: &str,
        matches: Vec<RawMatch<'a>>,
        snapshot: &CatalogSnapshot,
        context_radius: usize,
    ) -> Filtered<'a> {
        if matches.is_empty() {
            return Filtered::default();
        }

        let triggers = self.triggers(text, snapshot);
        let mut triggered: Vec<ContextType> = triggers.iter().map(|t| t.context_type).collect();
        triggered.dedup();
        if triggers.is_empty() {
            return Filtered {
                surviving: matches,
                triggered,
            };
        }

        let surviving: Vec<RawMatch<'a>> = match self.scope {
            ExclusionScope::Document => Vec::new(),
            ExclusionScope::Windowed => matches
                .into_iter()
                .filter_map(|raw| {
                    raw.retain_occurrences(text, context_radius, |occurrence| {
                        !triggers.iter().any(|trigger| {
                            char_distance(text, occurrence, &trigger.span) <= self.exclusion_radius
                        })
                    })
                })
                .collect(),
        };

        tracing::debug!(
            triggered = ?triggered,
            scope = ?self.scope,
            surviving = surviving.len(),
            "Exclusion contexts found"
        );
        Filtered {
            surviving,
            triggered,
        }
    }
}

fn find_spans(regex: &Regex, text: &str) -> Vec<Range<usize>> {
    regex.find_iter(text).map(|m| m.range()).collect()
}
