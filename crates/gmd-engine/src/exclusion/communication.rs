//! Communication verb, then a patient or family referent, then a sex term.
//!
//! "Discussed with the mother who said she ..." names who was spoken to. The
//! referent word may carry a plural or possessive suffix but must be followed
//! by whitespace, so "mother, she" does not fire.

use regex::{Regex, RegexBuilder};

use gmd_model::GapWindow;

use super::{SEX_TERMS, gap_fragment};

const VERBS: &str = "spoke|talked|discussed|communicated|contacted|called|informed|told|asked|explained|consulted";
const REFERENTS: &str = "patient|family|mother|father|parent|guardian";

pub(super) fn pattern(gap: GapWindow) -> Result<Regex, regex::Error> {
    let pattern = format!(
        r"\b(?:{VERBS})\s+(?:with\s+)?(?:the\s+)?(?:{REFERENTS})[\w']*\s+{}\b(?:{SEX_TERMS})\b",
        gap_fragment(gap)
    );
    RegexBuilder::new(&pattern).case_insensitive(true).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fires(text: &str) -> bool {
        pattern(GapWindow::Chars(50)).unwrap().is_match(text)
    }

    #[test]
    fn test_verb_referent_sex_term() {
        assert!(fires("Findings discussed with the mother who said she has no pain."));
        assert!(fires("Spoke with patient's father who said he was present."));
        assert!(fires("Told family members; male relative present."));
    }

    #[test]
    fn test_requires_all_three_parts() {
        assert!(!fires("Discussed with the referring team."));
        assert!(!fires("The mother said she was present."));
        assert!(!fires("Spoke with the patient about the exam."));
    }

    #[test]
    fn test_referent_needs_trailing_whitespace() {
        assert!(!fires("Findings discussed with the mother, she reports no pain."));
        assert!(!fires("Informed the family. He was present."));
        assert!(fires("Informed the family that he was present."));
    }
}
