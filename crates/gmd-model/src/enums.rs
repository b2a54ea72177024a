//! Type-safe enumerations for the detection domain.
//!
//! Catalog files and requests carry these concepts as free text; parsing is
//! case-insensitive and accepts the spellings found in existing data stores
//! (for example `Male`, `M`, `body_parts`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Recorded sex of the patient a report belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[serde(alias = "Male", alias = "MALE", alias = "M", alias = "m")]
    Male,
    #[serde(alias = "Female", alias = "FEMALE", alias = "F", alias = "f")]
    Female,
    /// Indeterminate sex. Detection is skipped for these patients.
    #[serde(alias = "Unknown", alias = "UNKNOWN", alias = "U", alias = "u")]
    Unknown,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Unknown => "unknown",
        }
    }

    /// Capitalized label used in tables and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
            Sex::Unknown => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Sex::Unknown)
    }

    /// The keyword association that matches this sex, if any.
    pub fn association(&self) -> Option<SexAssociation> {
        match self {
            Sex::Male => Some(SexAssociation::Male),
            Sex::Female => Some(SexAssociation::Female),
            Sex::Unknown => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Sex {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            "unknown" | "u" => Ok(Sex::Unknown),
            _ => Err(ModelError::unknown("sex", s)),
        }
    }
}

/// The sex a keyword is anatomically or clinically associated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SexAssociation {
    Male,
    Female,
}

impl SexAssociation {
    pub fn as_str(&self) -> &'static str {
        match self {
            SexAssociation::Male => "male",
            SexAssociation::Female => "female",
        }
    }

    /// The association of the opposite sex.
    pub fn opposite(&self) -> SexAssociation {
        match self {
            SexAssociation::Male => SexAssociation::Female,
            SexAssociation::Female => SexAssociation::Male,
        }
    }
}

impl fmt::Display for SexAssociation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SexAssociation {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(SexAssociation::Male),
            "female" | "f" => Ok(SexAssociation::Female),
            _ => Err(ModelError::unknown("sex association", s)),
        }
    }
}

/// Keyword taxonomy category.
///
/// Categories outside the known set are kept verbatim in [`KeywordCategory::Other`]
/// so catalogs can grow without a code change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KeywordCategory {
    BodyPart,
    Finding,
    LabTest,
    Procedure,
    Other(String),
}

impl KeywordCategory {
    /// Parse a category string. Singular, plural, and spaced spellings all map
    /// to the same variant.
    pub fn parse(s: &str) -> Self {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "body_part" | "body_parts" | "bodypart" | "anatomy" => Self::BodyPart,
            "finding" | "findings" => Self::Finding,
            "lab_test" | "lab_tests" | "lab" | "labs" => Self::LabTest,
            "procedure" | "procedures" => Self::Procedure,
            _ => Self::Other(s.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::BodyPart => "body_part",
            Self::Finding => "finding",
            Self::LabTest => "lab_test",
            Self::Procedure => "procedure",
            Self::Other(value) => value,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self {
            Self::BodyPart => "Body part",
            Self::Finding => "Finding",
            Self::LabTest => "Lab test",
            Self::Procedure => "Procedure",
            Self::Other(value) => value,
        }
    }
}

impl fmt::Display for KeywordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for KeywordCategory {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<KeywordCategory> for String {
    fn from(value: KeywordCategory) -> Self {
        value.as_str().to_string()
    }
}

/// Benign context an exclusion heuristic recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextType {
    /// Staff-role term followed by a sex-indicating term.
    HealthcareProvider,
    /// Communication verb, family/patient referent, then a sex-indicating term.
    Communication,
    /// Sex-indicating term near a patient or relative reference.
    PatientReference,
}

impl ContextType {
    pub const fn all() -> &'static [Self] {
        &[
            Self::HealthcareProvider,
            Self::Communication,
            Self::PatientReference,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HealthcareProvider => "healthcare_provider",
            Self::Communication => "communication",
            Self::PatientReference => "patient_reference",
        }
    }
}

impl fmt::Display for ContextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContextType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "healthcare_provider" | "provider" => Ok(Self::HealthcareProvider),
            "communication" => Ok(Self::Communication),
            "patient_reference" => Ok(Self::PatientReference),
            _ => Err(ModelError::unknown("context type", s)),
        }
    }
}

/// Severity assigned to a mismatch.
///
/// Variants are ordered so that `max()` over a set of priorities yields the
/// most severe one.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    #[serde(alias = "None")]
    None,
    #[serde(alias = "Low")]
    Low,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "High")]
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::None => "none",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::None => "None",
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Priority {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Priority::None),
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ModelError::unknown("priority", s)),
        }
    }
}

/// Which priority vocabulary the classifier uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriorityScheme {
    /// A single report checked against the patient record (high/medium).
    #[default]
    PerPatient,
    /// Two arbitrary text fields compared (high/medium/low by category).
    Comparative,
}

impl PriorityScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityScheme::PerPatient => "per-patient",
            PriorityScheme::Comparative => "comparative",
        }
    }
}

impl fmt::Display for PriorityScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
