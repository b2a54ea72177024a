//! Literal, whole-word, case-insensitive keyword matching.

use std::ops::Range;

use gmd_model::Keyword;
use regex::{Regex, RegexBuilder};

/// A keyword compiled as literal text.
///
/// Metacharacters in the keyword are escaped, so `o.b.` only matches the
/// literal text `o.b.`. Word boundaries are anchored on each side whose edge
/// character is a word character; a keyword that starts or ends with
/// punctuation is bounded by that punctuation instead.
#[derive(Debug, Clone)]
pub struct LiteralPattern {
    text: String,
    regex: Regex,
}

impl LiteralPattern {
    /// Compile `text`. Returns `Ok(None)` for blank keywords.
    pub fn new(text: &str) -> Result<Option<Self>, regex::Error> {
        let trimmed = text.trim();
        let (Some(first), Some(last)) = (trimmed.chars().next(), trimmed.chars().last()) else {
            return Ok(None);
        };

        let mut pattern = String::with_capacity(trimmed.len() + 8);
        if is_word_char(first) {
            pattern.push_str(r"\b");
        }
        pattern.push_str(&regex::escape(trimmed));
        if is_word_char(last) {
            pattern.push_str(r"\b");
        }

        let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
        Ok(Some(Self {
            text: trimmed.to_string(),
            regex,
        }))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte ranges of every non-overlapping occurrence, in text order.
    pub fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        self.regex.find_iter(text).map(|m| m.range()).collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A keyword found in the text, before exclusions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch<'a> {
    pub keyword: &'a Keyword,
    /// Byte ranges of each occurrence, in text order. Never empty.
    pub occurrences: Vec<Range<usize>>,
    /// Text around the first occurrence.
    pub context: String,
}

impl<'a> RawMatch<'a> {
    fn new(keyword: &'a Keyword, occurrences: Vec<Range<usize>>, text: &str, radius: usize) -> Self {
        let context = context_around(text, occurrences[0].clone(), radius);
        Self {
            keyword,
            occurrences,
            context,
        }
    }

    /// Keep only occurrences accepted by `keep`, rebuilding the context from
    /// the first one left. Returns `None` when nothing is left.
    pub fn retain_occurrences(
        mut self,
        text: &str,
        radius: usize,
        mut keep: impl FnMut(&Range<usize>) -> bool,
    ) -> Option<Self> {
        let before = self.occurrences.first().cloned();
        self.occurrences.retain(|occurrence| keep(occurrence));
        let first = self.occurrences.first()?.clone();
        if before.as_ref() != Some(&first) {
            self.context = context_around(text, first, radius);
        }
        Some(self)
    }
}

/// Compiled patterns for every keyword of a catalog, indexed like the catalog.
#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    patterns: Vec<Option<LiteralPattern>>,
}

impl KeywordMatcher {
    /// Compile a pattern per keyword. Keywords that fail to compile are
    /// logged and never match.
    pub fn new(keywords: &[Keyword]) -> Self {
        let patterns = keywords
            .iter()
            .map(|keyword| match LiteralPattern::new(&keyword.text) {
                Ok(pattern) => pattern,
                Err(error) => {
                    tracing::warn!(keyword = %keyword.text, %error, "Keyword pattern skipped");
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Match candidates (catalog index and keyword) against `text`.
    ///
    /// Results keep the candidate order; each keyword appears at most once
    /// no matter how many times it occurs.
    pub fn find<'a>(
        &self,
        text: &str,
        candidates: impl IntoIterator<Item = (usize, &'a Keyword)>,
        context_radius: usize,
    ) -> Vec<RawMatch<'a>> {
        candidates
            .into_iter()
            .filter_map(|(index, keyword)| {
                let pattern = self.patterns.get(index)?.as_ref()?;
                let occurrences = pattern.find_all(text);
                if occurrences.is_empty() {
                    return None;
                }
                tracing::trace!(keyword = pattern.text(), count = occurrences.len(), "Keyword matched");
                Some(RawMatch::new(keyword, occurrences, text, context_radius))
            })
            .collect()
    }
}

/// Widen `span` by `radius` characters on each side, clipped to the text.
pub fn char_window(text: &str, span: Range<usize>, radius: usize) -> Range<usize> {
    let start = text[..span.start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(span.start, |(index, _)| index);
    let end = text[span.end..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(index, _)| span.end + index);
    start..end
}

/// Source text within `radius` characters of `span`.
pub fn context_around(text: &str, span: Range<usize>, radius: usize) -> String {
    text[char_window(text, span, radius)].to_string()
}

/// Characters between two spans, zero when they overlap or touch.
pub fn char_distance(text: &str, a: &Range<usize>, b: &Range<usize>) -> usize {
    if a.end <= b.start {
        text[a.end..b.start].chars().count()
    } else if b.end <= a.start {
        text[b.end..a.start].chars().count()
    } else {
        0
    }
}
