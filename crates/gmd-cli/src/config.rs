//! TOML configuration for the command line.
//!
//! ```toml
//! [catalog]
//! dir = "/etc/gmd/catalog"
//!
//! [detection]
//! scheme = "per-patient"
//! exclusion_scope = "windowed"
//! exclusion_radius = 150
//! gap_chars = 50
//!
//! [history]
//! log = "/var/lib/gmd/detections.jsonl"
//! ```
//!
//! Command line flags win over the environment, which wins over the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gmd_model::{DetectionOptions, ExclusionScope, GapWindow, PriorityScheme};
use serde::{Deserialize, Serialize};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "GMD_CONFIG";

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "gmd.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub detection: DetectionConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Directory holding `keywords.csv` and `exclusions.csv`.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectionConfig {
    pub scheme: Option<PriorityScheme>,
    pub exclusion_scope: Option<ExclusionScope>,
    pub exclusion_radius: Option<usize>,
    /// Maximum characters between the terms of a multi-term exclusion.
    pub gap_chars: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    /// JSON-lines detection log.
    pub log: Option<PathBuf>,
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("parse configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read configuration {}", path.display()))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("load configuration {}", path.display()))?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Find the configuration to use.
    ///
    /// An explicit path must exist. Otherwise `GMD_CONFIG` is consulted, then
    /// `gmd.toml` in the working directory; with neither present the defaults
    /// apply.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
            return Self::load(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::load(local);
        }
        tracing::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Catalog directory, or `None` for the embedded catalog.
    pub fn catalog_dir(&self, flag: Option<&Path>) -> Option<PathBuf> {
        self.catalog_dir_with_env(flag, gmd_catalog::default_catalog_dir())
    }

    pub fn catalog_dir_with_env(
        &self,
        flag: Option<&Path>,
        env: Option<PathBuf>,
    ) -> Option<PathBuf> {
        flag.map(Path::to_path_buf)
            .or(env)
            .or_else(|| self.catalog.dir.clone())
    }

    /// Detection log path from the flag or the `[history]` table.
    pub fn log_path(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(|| self.history.log.clone())
    }

    /// Detection options with flag overrides applied over the file values.
    pub fn detection_options(
        &self,
        scheme: Option<PriorityScheme>,
        scope: Option<ExclusionScope>,
    ) -> DetectionOptions {
        let scheme = scheme.or(self.detection.scheme).unwrap_or_default();
        let mut options = match scheme {
            PriorityScheme::PerPatient => DetectionOptions::per_patient(),
            PriorityScheme::Comparative => DetectionOptions::comparative(),
        };
        if let Some(scope) = scope.or(self.detection.exclusion_scope) {
            options = options.with_exclusion_scope(scope);
        }
        if let Some(radius) = self.detection.exclusion_radius {
            options = options.with_exclusion_radius(radius);
        }
        if let Some(gap) = self.detection.gap_chars {
            options = options.with_gap(GapWindow::Chars(gap));
        }
        options
    }

    /// Options for dataset comparison, ignoring any configured scheme.
    pub fn comparative_options(&self, scope: Option<ExclusionScope>) -> DetectionOptions {
        self.detection_options(Some(PriorityScheme::Comparative), scope)
    }
}
