//! Diagnostics for the `gmd` binary.
//!
//! Events go to stderr or to `--log-file`, never to stdout, which carries
//! command output. Report text counts as patient data: it is replaced by
//! [`REDACTED_VALUE`] unless `--log-data` is given.
//!
//! Levels used by the workspace crates:
//!
//! - `warn`: skipped catalog rows, unreadable dataset genders
//! - `info`: catalog loading, per-report and per-dataset summaries
//! - `debug`: stage counts and exclusion triggers
//! - `trace`: matched keywords with their (redacted) context

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self, writer::BoxMakeWriter};
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Stand-in for report text when `--log-data` is off.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Crates whose events follow the configured level.
const WORKSPACE_CRATES: [&str; 5] = [
    "gmd_cli",
    "gmd_catalog",
    "gmd_engine",
    "gmd_history",
    "gmd_model",
];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// `value` when report text may be logged, [`REDACTED_VALUE`] otherwise.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level applied to workspace crates.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter` when set.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    pub with_target: bool,
    /// Emit span close events in JSON output.
    pub with_spans: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of stderr.
    pub log_file: Option<PathBuf>,
    /// Whether report text may be logged.
    pub log_data: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    /// One JSON object per line.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_spans: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    #[must_use]
    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }
}

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Fails when the log file cannot be opened or a global subscriber is
/// already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let writer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::stderr),
    };
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    tracing_subscriber::registry()
        .with(output_layer(config, writer))
        .try_init()
        .map_err(io::Error::other)
}

/// The formatting layer for `config`, filtered to the configured level.
fn output_layer(config: &LogConfig, writer: BoxMakeWriter) -> BoxedLayer {
    let filter = build_env_filter(config.level_filter, config.use_env_filter);
    let base = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target);
    let layer: BoxedLayer = match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => {
            let spans = if config.with_spans {
                FmtSpan::CLOSE
            } else {
                FmtSpan::NONE
            };
            base.json().with_span_events(spans).boxed()
        }
        (LogFormat::Compact, true) => base.compact().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Compact, false) => base
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => base.with_ansi(config.with_ansi).boxed(),
        (LogFormat::Pretty, false) => base.with_ansi(config.with_ansi).without_time().boxed(),
    };
    layer.with_filter(filter).boxed()
}

/// Filter directives for the workspace crates at `level`. Other crates are
/// held at warn.
pub fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    let mut directives = vec!["warn".to_string()];
    directives.extend(WORKSPACE_CRATES.iter().map(|name| format!("{name}={level}")));
    directives.join(",")
}

fn build_env_filter(level: LevelFilter, use_env_filter: bool) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(level));
    if use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(config: &LogConfig, emit: impl FnOnce()) -> String {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("gmd.log");
        let file = std::fs::File::create(&path).unwrap();
        let layer = output_layer(config, BoxMakeWriter::new(Mutex::new(file)));
        tracing::subscriber::with_default(tracing_subscriber::registry().with(layer), emit);
        std::fs::read_to_string(&path).unwrap()
    }

    fn quiet_config(format: LogFormat) -> LogConfig {
        let mut config = LogConfig::default()
            .with_level_filter(LevelFilter::INFO)
            .with_format(format);
        config.use_env_filter = false;
        config.with_ansi = false;
        config
    }

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives(LevelFilter::DEBUG),
            "warn,gmd_cli=debug,gmd_catalog=debug,gmd_engine=debug,\
             gmd_history=debug,gmd_model=debug"
        );
    }

    #[test]
    fn test_off_level_directives() {
        assert!(default_directives(LevelFilter::OFF).contains("gmd_engine=off"));
    }

    #[test]
    fn test_redaction_by_default() {
        assert!(!LogConfig::default().log_data);
        assert_eq!(redact_value("prostate"), REDACTED_VALUE);
    }

    #[test]
    fn test_events_below_level_are_dropped() {
        let output = capture(&quiet_config(LogFormat::Compact), || {
            tracing::info!(mismatches = 2, "Report checked");
            tracing::debug!("Detection complete");
        });
        assert!(output.contains("Report checked"));
        assert!(output.contains("mismatches=2"));
        assert!(!output.contains("Detection complete"));
    }

    #[test]
    fn test_json_lines() {
        let output = capture(&quiet_config(LogFormat::Json), || {
            tracing::warn!(row = 3, "Unrecognized gender");
        });
        let line = output.lines().next().unwrap();
        let event: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(event["level"], "WARN");
        assert_eq!(event["fields"]["message"], "Unrecognized gender");
        assert_eq!(event["fields"]["row"], 3);
    }
}
