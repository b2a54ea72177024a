//! Sex-indicating term near a patient or relative reference.
//!
//! Referents are found anywhere in the text, including inside longer words
//! such as "outpatient".

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::matcher::char_window;

use super::SEX_TERMS;

static SEX_TERM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(&format!(r"\b(?:{SEX_TERMS})\b"))
        .case_insensitive(true)
        .build()
        .expect("Invalid sex term regex")
});

static REFERENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"patient|family|mother|father|parent")
        .case_insensitive(true)
        .build()
        .expect("Invalid referent regex")
});

/// Spans of every sex term with a referent inside `radius` characters.
pub(super) fn triggers(text: &str, radius: usize) -> Vec<Range<usize>> {
    let referents: Vec<Range<usize>> = REFERENT_REGEX.find_iter(text).map(|m| m.range()).collect();
    if referents.is_empty() {
        return Vec::new();
    }

    SEX_TERM_REGEX
        .find_iter(text)
        .map(|m| m.range())
        .filter(|span| {
            let window = char_window(text, span.clone(), radius);
            referents
                .iter()
                .any(|referent| referent.start >= window.start && referent.end <= window.end)
        })
        .collect()
}
