//! Catalog loading for gender mismatch detection.
//!
//! Keyword and exclusion catalogs are read from CSV (a directory on disk or
//! the embedded defaults) and turned into an immutable [`CatalogSnapshot`]
//! with disabled records already removed.

mod csv_utils;
pub mod dataset;
pub mod embedded;
pub mod error;
pub mod loader;

pub use dataset::{Choice, DatasetOverview, DatasetRecord, GtDataset, truncate_label};
pub use error::{CatalogError, Result};
pub use gmd_model::CatalogSnapshot;
pub use loader::{
    CATALOG_ENV_VAR, EXCLUSIONS_FILE, KEYWORDS_FILE, default_catalog_dir, load_catalog,
    load_catalog_dir, load_default_catalog, load_exclusions, load_keywords, parse_exclusions,
    parse_keywords,
};
