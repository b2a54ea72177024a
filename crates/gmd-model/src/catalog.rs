//! Immutable catalog snapshot handed to each detection call.

use std::collections::HashSet;

use crate::enums::{ContextType, SexAssociation};
use crate::keyword::{ExclusionRule, Keyword};

/// Enabled keywords and exclusion rules, in catalog order.
///
/// Disabled records are dropped once, when the snapshot is built, so the
/// detection stages never look at `enabled` flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    keywords: Vec<Keyword>,
    exclusions: Vec<ExclusionRule>,
}

impl CatalogSnapshot {
    /// Build a snapshot from raw catalog records.
    ///
    /// Keywords are unique by (case-insensitive text, sex association); the
    /// first record wins.
    pub fn from_records(
        keywords: impl IntoIterator<Item = Keyword>,
        exclusions: impl IntoIterator<Item = ExclusionRule>,
    ) -> Self {
        let mut seen: HashSet<(String, SexAssociation)> = HashSet::new();
        let keywords = keywords
            .into_iter()
            .filter(|keyword| keyword.enabled)
            .filter(|keyword| {
                seen.insert((keyword.text.trim().to_lowercase(), keyword.sex_association))
            })
            .collect();
        let exclusions = exclusions
            .into_iter()
            .filter(|rule| rule.enabled)
            .collect();
        Self {
            keywords,
            exclusions,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn exclusions(&self) -> &[ExclusionRule] {
        &self.exclusions
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    pub fn exclusion_count(&self) -> usize {
        self.exclusions.len()
    }

    /// True when an enabled rule of this context type is present.
    pub fn is_excluded_context(&self, context_type: ContextType) -> bool {
        self.exclusions
            .iter()
            .any(|rule| rule.context_type == context_type)
    }

    pub fn keywords_for(&self, association: SexAssociation) -> impl Iterator<Item = &Keyword> {
        self.keywords
            .iter()
            .filter(move |keyword| keyword.sex_association == association)
    }

    /// Keywords ordered by text, for listings.
    pub fn sorted_keywords(&self) -> Vec<&Keyword> {
        let mut sorted: Vec<&Keyword> = self.keywords.iter().collect();
        sorted.sort_by(|a, b| a.text.to_lowercase().cmp(&b.text.to_lowercase()));
        sorted
    }
}
