//! Built-in catalog data, embedded at compile time.

/// Default keyword taxonomy.
pub const DEFAULT_KEYWORDS: &str = include_str!("../data/keywords.csv");

/// Default exclusion rules (all three heuristics enabled).
pub const DEFAULT_EXCLUSIONS: &str = include_str!("../data/exclusions.csv");
