//! CSV loaders for the keyword and exclusion catalogs.
//!
//! Column names follow the tables the catalogs were exported from:
//!
//! - keywords: `keyword, gender_type, category, subcategory, pregnancy_related, enabled`
//! - exclusions: `context_type, enabled, description`

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use gmd_model::{
    CatalogSnapshot, ContextType, ExclusionRule, Keyword, KeywordCategory, SexAssociation,
};

use crate::csv_utils::{parse_flag, read_rows};
use crate::embedded;
use crate::error::{CatalogError, Result};

/// Environment variable naming a catalog directory.
pub const CATALOG_ENV_VAR: &str = "GMD_CATALOG_DIR";

pub const KEYWORDS_FILE: &str = "keywords.csv";
pub const EXCLUSIONS_FILE: &str = "exclusions.csv";

/// Catalog directory from the environment, if set.
pub fn default_catalog_dir() -> Option<PathBuf> {
    std::env::var_os(CATALOG_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Parse keyword records from CSV.
///
/// Rows with an empty keyword are skipped. Duplicate keywords (same text and
/// sex association) keep the first row.
pub fn parse_keywords<R: Read>(reader: R, source_name: &str) -> Result<Vec<Keyword>> {
    let (columns, rows) = read_rows(reader, source_name)?;
    let keyword_i = Some(columns.required("keyword")?);
    let gender_i = Some(columns.required("gender_type")?);
    let category_i = Some(columns.required("category")?);
    let subcategory_i = columns.optional("subcategory");
    let pregnancy_i = columns.optional("pregnancy_related");
    let enabled_i = columns.optional("enabled");

    let invalid = |field: &'static str, value: &str, line: u64| CatalogError::InvalidValue {
        field,
        value: value.to_string(),
        source_name: source_name.to_string(),
        line,
    };

    let mut seen: HashSet<(String, SexAssociation)> = HashSet::new();
    let mut keywords = Vec::with_capacity(rows.len());
    for row in rows {
        let text = row.get(keyword_i);
        if text.is_empty() {
            continue;
        }

        let raw_gender = row.get(gender_i);
        let sex_association: SexAssociation = raw_gender
            .parse()
            .map_err(|_| invalid("gender_type", raw_gender, row.line))?;

        let raw_pregnancy = row.get(pregnancy_i);
        let pregnancy_related = parse_flag(raw_pregnancy, false)
            .ok_or_else(|| invalid("pregnancy_related", raw_pregnancy, row.line))?;

        let raw_enabled = row.get(enabled_i);
        let enabled = parse_flag(raw_enabled, true)
            .ok_or_else(|| invalid("enabled", raw_enabled, row.line))?;

        if !seen.insert((text.to_lowercase(), sex_association)) {
            tracing::warn!(
                source = source_name,
                keyword = text,
                line = row.line,
                "Duplicate keyword ignored"
            );
            continue;
        }

        keywords.push(Keyword {
            text: text.to_string(),
            sex_association,
            category: KeywordCategory::parse(row.get(category_i)),
            subcategory: row.non_empty(subcategory_i),
            pregnancy_related,
            enabled,
        });
    }

    tracing::debug!(source = source_name, count = keywords.len(), "Keywords loaded");
    Ok(keywords)
}

/// Parse exclusion rule records from CSV.
pub fn parse_exclusions<R: Read>(reader: R, source_name: &str) -> Result<Vec<ExclusionRule>> {
    let (columns, rows) = read_rows(reader, source_name)?;
    let context_i = Some(columns.required("context_type")?);
    let enabled_i = columns.optional("enabled");
    let description_i = columns.optional("description");

    let mut rules = Vec::with_capacity(rows.len());
    for row in rows {
        let raw_context = row.get(context_i);
        if raw_context.is_empty() {
            continue;
        }
        let context_type: ContextType =
            raw_context
                .parse()
                .map_err(|_| CatalogError::InvalidValue {
                    field: "context_type",
                    value: raw_context.to_string(),
                    source_name: source_name.to_string(),
                    line: row.line,
                })?;
        let raw_enabled = row.get(enabled_i);
        let enabled = parse_flag(raw_enabled, true).ok_or_else(|| CatalogError::InvalidValue {
            field: "enabled",
            value: raw_enabled.to_string(),
            source_name: source_name.to_string(),
            line: row.line,
        })?;
        rules.push(ExclusionRule {
            context_type,
            enabled,
            description: row.non_empty(description_i),
        });
    }

    tracing::debug!(source = source_name, count = rules.len(), "Exclusion rules loaded");
    Ok(rules)
}

/// Load keyword records from a CSV file.
pub fn load_keywords(path: &Path) -> Result<Vec<Keyword>> {
    parse_keywords(open_csv(path)?, &path.display().to_string())
}

/// Load exclusion rule records from a CSV file.
pub fn load_exclusions(path: &Path) -> Result<Vec<ExclusionRule>> {
    parse_exclusions(open_csv(path)?, &path.display().to_string())
}

/// Load a snapshot from a directory holding `keywords.csv` and `exclusions.csv`.
pub fn load_catalog_dir(dir: &Path) -> Result<CatalogSnapshot> {
    if !dir.is_dir() {
        return Err(CatalogError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let keywords = load_keywords(&dir.join(KEYWORDS_FILE))?;
    let exclusions = load_exclusions(&dir.join(EXCLUSIONS_FILE))?;
    Ok(CatalogSnapshot::from_records(keywords, exclusions))
}

/// Load the built-in catalog.
pub fn load_default_catalog() -> Result<CatalogSnapshot> {
    let keywords = parse_keywords(embedded::DEFAULT_KEYWORDS.as_bytes(), "embedded keywords")?;
    let exclusions =
        parse_exclusions(embedded::DEFAULT_EXCLUSIONS.as_bytes(), "embedded exclusions")?;
    Ok(CatalogSnapshot::from_records(keywords, exclusions))
}

/// Load a snapshot from `dir` when given, otherwise from the built-in catalog.
pub fn load_catalog(dir: Option<&Path>) -> Result<CatalogSnapshot> {
    let snapshot = match dir {
        Some(dir) => load_catalog_dir(dir)?,
        None => load_default_catalog()?,
    };
    tracing::info!(
        keywords = snapshot.keyword_count(),
        exclusions = snapshot.exclusion_count(),
        source = dir.map_or_else(|| "embedded".to_string(), |d| d.display().to_string()),
        "Catalog snapshot ready"
    );
    Ok(snapshot)
}

fn open_csv(path: &Path) -> Result<File> {
    if !path.is_file() {
        return Err(CatalogError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}
