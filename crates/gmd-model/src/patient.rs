use serde::{Deserialize, Serialize};

use crate::enums::Sex;

/// Age below which pregnancy-related keywords are not flagged for male patients.
pub const PREGNANCY_AGE_THRESHOLD: u32 = 8;

/// Age below which pregnancy-related keywords are not checked in comparative
/// analysis, for either sex.
pub const ADULT_AGE: u32 = 18;

/// Patient sex and age supplied with each detection request.
///
/// Age is validated by the caller; the engine treats it as an opaque
/// threshold input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientDescriptor {
    pub sex: Sex,
    pub age: u32,
}

impl PatientDescriptor {
    pub fn new(sex: Sex, age: u32) -> Self {
        Self { sex, age }
    }

    pub fn male(age: u32) -> Self {
        Self::new(Sex::Male, age)
    }

    pub fn female(age: u32) -> Self {
        Self::new(Sex::Female, age)
    }

    pub fn unknown(age: u32) -> Self {
        Self::new(Sex::Unknown, age)
    }

    /// True for patients younger than [`PREGNANCY_AGE_THRESHOLD`].
    pub fn is_below_pregnancy_age(&self) -> bool {
        self.age < PREGNANCY_AGE_THRESHOLD
    }

    /// True for patients younger than [`ADULT_AGE`].
    pub fn is_minor(&self) -> bool {
        self.age < ADULT_AGE
    }
}
