//! Mismatch severity.

use gmd_model::{
    Keyword, KeywordCategory, PatientDescriptor, Priority, PriorityScheme, Sex, SexAssociation,
};

/// Severity of a surviving match. Depends only on the keyword, the patient
/// and the scheme.
pub fn classify(
    keyword: &Keyword,
    patient: &PatientDescriptor,
    scheme: PriorityScheme,
) -> Priority {
    match scheme {
        PriorityScheme::PerPatient => per_patient(keyword, patient),
        PriorityScheme::Comparative => comparative(keyword, patient),
    }
}

fn per_patient(keyword: &Keyword, patient: &PatientDescriptor) -> Priority {
    let high = match (patient.sex, keyword.sex_association) {
        (Sex::Female, SexAssociation::Male) => true,
        (Sex::Male, SexAssociation::Female) => {
            !patient.is_below_pregnancy_age() || !keyword.pregnancy_related
        }
        _ => false,
    };
    if high { Priority::High } else { Priority::Medium }
}

fn comparative(keyword: &Keyword, patient: &PatientDescriptor) -> Priority {
    let opposite = patient
        .sex
        .association()
        .is_some_and(|own| own != keyword.sex_association);
    if !opposite {
        return Priority::Low;
    }
    match keyword.category {
        KeywordCategory::BodyPart | KeywordCategory::Finding => Priority::High,
        KeywordCategory::LabTest => Priority::Medium,
        _ => Priority::Low,
    }
}
