//! Report text input from a flag, a file or stdin.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Read the report text to check.
///
/// `--text` wins over `--file`; with neither, stdin is read unless it is a
/// terminal.
pub fn read_report(text: Option<&str>, file: Option<&Path>) -> Result<String> {
    let stdin = io::stdin();
    if text.is_none() && file.is_none() && stdin.is_terminal() {
        bail!("no report text: pass --text, --file or pipe the report on stdin");
    }
    read_report_with(text, file, &mut stdin.lock())
}

/// Like [`read_report`], reading from `fallback` instead of stdin.
pub fn read_report_with(
    text: Option<&str>,
    file: Option<&Path>,
    fallback: &mut dyn Read,
) -> Result<String> {
    let report = match (text, file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("read report {}", path.display()))?,
        (None, None) => {
            let mut buffer = String::new();
            fallback
                .read_to_string(&mut buffer)
                .context("read report from stdin")?;
            buffer
        }
    };
    if report.trim().is_empty() {
        bail!("report text is empty");
    }
    Ok(report)
}
