//! Candidate keyword selection by patient sex, age and priority scheme.

use gmd_model::{CatalogSnapshot, Keyword, PatientDescriptor, PriorityScheme, Sex, SexAssociation};

/// Keywords applicable to `patient` under `scheme`, in catalog order.
///
/// Per patient, female patients are checked against male keywords and male
/// patients against female keywords. Male patients younger than the pregnancy
/// age threshold are not checked against pregnancy-related keywords.
///
/// Comparative analysis checks every keyword, leaving same-sex matches to be
/// graded low, and drops pregnancy-related keywords for minors.
///
/// Unknown sex selects nothing in either scheme.
pub fn select<'a>(
    patient: &PatientDescriptor,
    snapshot: &'a CatalogSnapshot,
    scheme: PriorityScheme,
) -> Vec<&'a Keyword> {
    snapshot
        .keywords()
        .iter()
        .filter(|keyword| applies(patient, keyword, scheme))
        .collect()
}

/// Whether `keyword` belongs to the candidate set for `patient`.
pub fn applies(patient: &PatientDescriptor, keyword: &Keyword, scheme: PriorityScheme) -> bool {
    match (scheme, patient.sex) {
        (_, Sex::Unknown) => false,
        (PriorityScheme::Comparative, _) => !(patient.is_minor() && keyword.pregnancy_related),
        (PriorityScheme::PerPatient, Sex::Female) => {
            keyword.sex_association == SexAssociation::Male
        }
        (PriorityScheme::PerPatient, Sex::Male) => {
            keyword.sex_association == SexAssociation::Female
                && !(patient.is_below_pregnancy_age() && keyword.pregnancy_related)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmd_model::{ExclusionRule, KeywordCategory};

    const PER_PATIENT: PriorityScheme = PriorityScheme::PerPatient;
    const COMPARATIVE: PriorityScheme = PriorityScheme::Comparative;

    fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot::from_records(
            vec![
                Keyword::new("uterus", SexAssociation::Female, KeywordCategory::BodyPart),
                Keyword::new("prostate", SexAssociation::Male, KeywordCategory::BodyPart),
                Keyword::new("pregnancy", SexAssociation::Female, KeywordCategory::Finding)
                    .with_pregnancy_related(true),
                Keyword::new("psa", SexAssociation::Male, KeywordCategory::LabTest),
            ],
            Vec::<ExclusionRule>::new(),
        )
    }

    fn texts(keywords: &[&Keyword]) -> Vec<String> {
        keywords.iter().map(|k| k.text.clone()).collect()
    }

    #[test]
    fn female_patient_gets_male_keywords() {
        let snapshot = snapshot();
        let selected = select(&PatientDescriptor::female(40), &snapshot, PER_PATIENT);
        assert_eq!(texts(&selected), vec!["prostate", "psa"]);
    }

    #[test]
    fn male_patient_age_threshold() {
        let snapshot = snapshot();
        let adult = select(&PatientDescriptor::male(8), &snapshot, PER_PATIENT);
        assert_eq!(texts(&adult), vec!["uterus", "pregnancy"]);

        let child = select(&PatientDescriptor::male(7), &snapshot, PER_PATIENT);
        assert_eq!(texts(&child), vec!["uterus"]);

        let newborn = select(&PatientDescriptor::male(0), &snapshot, PER_PATIENT);
        assert_eq!(texts(&newborn), vec!["uterus"]);
    }

    #[test]
    fn unknown_sex_selects_nothing() {
        let snapshot = snapshot();
        assert!(select(&PatientDescriptor::unknown(30), &snapshot, PER_PATIENT).is_empty());
        assert!(select(&PatientDescriptor::unknown(30), &snapshot, COMPARATIVE).is_empty());
    }

    #[test]
    fn comparative_checks_every_keyword() {
        let snapshot = snapshot();
        let female = select(&PatientDescriptor::female(50), &snapshot, COMPARATIVE);
        assert_eq!(texts(&female), vec!["uterus", "prostate", "pregnancy", "psa"]);

        let male = select(&PatientDescriptor::male(18), &snapshot, COMPARATIVE);
        assert_eq!(texts(&male), vec!["uterus", "prostate", "pregnancy", "psa"]);
    }

    #[test]
    fn comparative_drops_pregnancy_for_minors() {
        let snapshot = snapshot();
        for patient in [PatientDescriptor::female(17), PatientDescriptor::male(12)] {
            let selected = select(&patient, &snapshot, COMPARATIVE);
            assert_eq!(texts(&selected), vec!["uterus", "prostate", "psa"]);
        }
    }
}
