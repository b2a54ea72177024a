//! Catalog records: keywords and exclusion rules.

use serde::{Deserialize, Serialize};

use crate::enums::{ContextType, KeywordCategory, SexAssociation};

/// A keyword from the taxonomy.
///
/// Keywords are reference data: unique by `text` within a `sex_association`
/// and never mutated once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub text: String,
    pub sex_association: SexAssociation,
    pub category: KeywordCategory,
    pub subcategory: Option<String>,
    /// Pregnancy-related keywords are not flagged for male patients under 8.
    pub pregnancy_related: bool,
    pub enabled: bool,
}

impl Keyword {
    /// Create an enabled, non-pregnancy keyword.
    pub fn new(
        text: impl Into<String>,
        sex_association: SexAssociation,
        category: KeywordCategory,
    ) -> Self {
        Self {
            text: text.into(),
            sex_association,
            category,
            subcategory: None,
            pregnancy_related: false,
            enabled: true,
        }
    }

    #[must_use]
    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    #[must_use]
    pub fn with_pregnancy_related(mut self, pregnancy_related: bool) -> Self {
        self.pregnancy_related = pregnancy_related;
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// An exclusion rule descriptor. Only the enable flag is data-driven; the
/// pattern behind each context type is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRule {
    pub context_type: ContextType,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExclusionRule {
    pub fn new(context_type: ContextType) -> Self {
        Self {
            context_type,
            enabled: true,
            description: None,
        }
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
