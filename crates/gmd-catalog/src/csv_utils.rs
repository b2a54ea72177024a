//! Shared CSV reading helpers.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{CatalogError, Result};

/// Header row with case-insensitive column lookup.
pub(crate) struct Columns {
    names: Vec<String>,
    source_name: String,
}

impl Columns {
    fn new(headers: &StringRecord, source_name: &str) -> Self {
        Self {
            names: headers
                .iter()
                .map(|h| h.trim_matches('\u{feff}').trim().to_lowercase())
                .collect(),
            source_name: source_name.to_string(),
        }
    }

    /// Index of a column that must be present.
    pub(crate) fn required(&self, name: &'static str) -> Result<usize> {
        self.optional(name)
            .ok_or_else(|| CatalogError::MissingColumn {
                column: name,
                source_name: self.source_name.clone(),
            })
    }

    pub(crate) fn optional(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|h| h == name)
    }
}

/// A data row with its source line for error reporting.
pub(crate) struct Row {
    pub record: StringRecord,
    pub line: u64,
}

impl Row {
    /// Trimmed field value; empty when the column is absent or blank.
    pub(crate) fn get(&self, idx: Option<usize>) -> &str {
        idx.and_then(|i| self.record.get(i)).unwrap_or("").trim()
    }

    /// Trimmed non-empty field value.
    pub(crate) fn non_empty(&self, idx: Option<usize>) -> Option<String> {
        let value = self.get(idx);
        (!value.is_empty()).then(|| value.to_string())
    }
}

/// Read the header row and every data row of a CSV source.
pub(crate) fn read_rows<R: Read>(reader: R, source_name: &str) -> Result<(Columns, Vec<Row>)> {
    let csv_error = |source: csv::Error| CatalogError::CsvRead {
        source_name: source_name.to_string(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = reader.headers().map_err(csv_error)?.clone();
    let columns = Columns::new(&headers, source_name);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push(Row { record, line });
    }
    Ok((columns, rows))
}

/// Parse a boolean catalog flag. Blank values fall back to `default`.
pub(crate) fn parse_flag(raw: &str, default: bool) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "" => Some(default),
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}
