//! Staff-role term followed by a sex-indicating term.
//!
//! "The attending physician, a female, ..." describes staff, not the patient.

use regex::{Regex, RegexBuilder};

use gmd_model::GapWindow;

use super::{SEX_TERMS, gap_fragment};

const STAFF_TERMS: &str = r"physician|doctor|dr\.?|nurse|provider|technician|radiologist|clinician|staff|attending|resident|intern";

pub(super) fn pattern(gap: GapWindow) -> Result<Regex, regex::Error> {
    let pattern = format!(
        r"\b(?:{STAFF_TERMS})\s+{}\b(?:{SEX_TERMS})\b",
        gap_fragment(gap)
    );
    RegexBuilder::new(&pattern).case_insensitive(true).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fires(gap: GapWindow, text: &str) -> bool {
        pattern(gap).unwrap().is_match(text)
    }

    #[test]
    fn test_staff_followed_by_sex_term() {
        let gap = GapWindow::Chars(50);
        assert!(fires(
            gap,
            "The attending physician, a female, reviewed the study."
        ));
        assert!(fires(gap, "Dr. Patel reviewed the images and she agrees."));
        assert!(!fires(gap, "Normal prostate. No nurse present."));
        assert!(!fires(gap, "The staffing was adequate for his exam."));
    }

    #[test]
    fn test_gap_limits() {
        let far = format!("radiologist {} she", "x".repeat(60));
        assert!(!fires(GapWindow::Chars(50), &far));
        assert!(fires(GapWindow::Sentence, &far));
        assert!(!fires(GapWindow::Sentence, "Reviewed by radiologist. She is well."));
    }
}
