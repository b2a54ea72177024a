//! CLI argument definitions for the gender mismatch detector.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use gmd_model::{ExclusionScope, PriorityScheme, Sex, SexAssociation};

#[derive(Parser)]
#[command(
    name = "gmd",
    version,
    about = "Gender mismatch detection for radiology reports",
    long_about = "Flag radiology report wording that contradicts the patient's recorded sex.\n\n\
                  Reports are checked against a keyword catalog; staff, communication and \
                  relative mentions are excluded before priorities are assigned."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: $GMD_CONFIG, then ./gmd.toml).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow report excerpts in trace logs (may contain PHI).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check one report against the patient's recorded sex and age.
    Detect(DetectArgs),

    /// Compare a recorded sex against findings and impression text.
    Compare(CompareArgs),

    /// Inspect or analyse a ground-truth dataset.
    #[command(subcommand)]
    Dataset(DatasetCommand),

    /// List the enabled keyword catalog.
    Keywords(KeywordsArgs),

    /// Summarize the detection log.
    Stats(StatsArgs),
}

/// Options shared by commands that build a detection engine.
#[derive(Args)]
pub struct EngineArgs {
    /// Catalog directory with keywords.csv and exclusions.csv.
    #[arg(long = "catalog", value_name = "DIR")]
    pub catalog: Option<PathBuf>,

    /// How far an exclusion trigger reaches.
    #[arg(long = "exclusion-scope", value_enum)]
    pub exclusion_scope: Option<ExclusionScopeArg>,

    /// Append results to this detection log.
    #[arg(long = "log", value_name = "PATH")]
    pub log: Option<PathBuf>,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct DetectArgs {
    /// Recorded patient sex (male, female, unknown).
    #[arg(long = "sex", value_parser = parse_sex)]
    pub sex: Sex,

    /// Patient age in years.
    #[arg(long = "age")]
    pub age: u32,

    /// Report text (reads --file or stdin when omitted).
    #[arg(long = "text", conflicts_with = "file")]
    pub text: Option<String>,

    /// File holding the report text.
    #[arg(long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Priority scheme for mismatches.
    #[arg(long = "scheme", value_enum)]
    pub scheme: Option<SchemeArg>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Args)]
pub struct CompareArgs {
    /// Recorded sex of the dataset row.
    #[arg(long = "gender", value_parser = parse_sex)]
    pub gender: Option<Sex>,

    /// Findings text.
    #[arg(long = "findings")]
    pub findings: Option<String>,

    /// Human-written impression text.
    #[arg(long = "impression")]
    pub impression: Option<String>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Subcommand)]
pub enum DatasetCommand {
    /// Show the distinct genders, findings and impressions of a dataset.
    Overview(DatasetOverviewArgs),

    /// Compare every row's gender against its findings and impression.
    Analyze(DatasetAnalyzeArgs),
}

#[derive(Args)]
pub struct DatasetOverviewArgs {
    /// Dataset CSV with gender, findings and human_impression columns.
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct DatasetAnalyzeArgs {
    /// Dataset CSV with gender, findings and human_impression columns.
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Analyse only the first N rows.
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Args)]
pub struct KeywordsArgs {
    /// Catalog directory with keywords.csv and exclusions.csv.
    #[arg(long = "catalog", value_name = "DIR")]
    pub catalog: Option<PathBuf>,

    /// Only list keywords associated with this sex.
    #[arg(long = "association", value_enum)]
    pub association: Option<AssociationArg>,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct StatsArgs {
    /// Detection log to summarize.
    #[arg(long = "log", value_name = "PATH")]
    pub log: Option<PathBuf>,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SchemeArg {
    PerPatient,
    Comparative,
}

impl From<SchemeArg> for PriorityScheme {
    fn from(value: SchemeArg) -> Self {
        match value {
            SchemeArg::PerPatient => PriorityScheme::PerPatient,
            SchemeArg::Comparative => PriorityScheme::Comparative,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExclusionScopeArg {
    Document,
    Windowed,
}

impl From<ExclusionScopeArg> for ExclusionScope {
    fn from(value: ExclusionScopeArg) -> Self {
        match value {
            ExclusionScopeArg::Document => ExclusionScope::Document,
            ExclusionScopeArg::Windowed => ExclusionScope::Windowed,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum AssociationArg {
    Male,
    Female,
}

impl From<AssociationArg> for SexAssociation {
    fn from(value: AssociationArg) -> Self {
        match value {
            AssociationArg::Male => SexAssociation::Male,
            AssociationArg::Female => SexAssociation::Female,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_sex(value: &str) -> Result<Sex, String> {
    value.parse().map_err(|error| format!("{error}"))
}
