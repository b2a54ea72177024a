use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info_span;

use gmd_catalog::{CatalogSnapshot, GtDataset, load_catalog};
use gmd_cli::config::Config;
use gmd_cli::input::read_report;
use gmd_cli::workflow::{
    DatasetAnalysis, DetectOutcome, analyze_dataset, compare_columns, detect_report,
};
use gmd_history::{DetectionLog, statistics};
use gmd_model::{ComparativeAnalysis, ComparisonRequest, PatientDescriptor, SexAssociation};

use crate::cli::{
    CompareArgs, DatasetAnalyzeArgs, DatasetOverviewArgs, DetectArgs, EngineArgs, KeywordsArgs,
    OutputFormatArg, StatsArgs,
};
use crate::summary::{
    print_comparison, print_dataset_analysis, print_detection, print_keywords, print_overview,
    print_statistics,
};

pub fn run_detect(args: &DetectArgs, config: &Config) -> Result<DetectOutcome> {
    let text = read_report(args.text.as_deref(), args.file.as_deref())?;
    let snapshot = catalog(config, args.engine.catalog.as_deref())?;
    let options = config.detection_options(
        args.scheme.map(Into::into),
        args.engine.exclusion_scope.map(Into::into),
    );
    let log = detection_log(config, &args.engine);
    let patient = PatientDescriptor::new(args.sex, args.age);

    let outcome = detect_report(snapshot, options, patient, &text, log.as_ref())?;
    match args.engine.format {
        OutputFormatArg::Table => print_detection(&outcome),
        OutputFormatArg::Json => print_json(&outcome.result)?,
    }
    Ok(outcome)
}

pub fn run_compare(args: &CompareArgs, config: &Config) -> Result<ComparativeAnalysis> {
    let snapshot = catalog(config, args.engine.catalog.as_deref())?;
    let options = config.comparative_options(args.engine.exclusion_scope.map(Into::into));
    let log = detection_log(config, &args.engine);
    let request = ComparisonRequest::new(
        args.gender,
        args.findings.clone(),
        args.impression.clone(),
    );

    let analysis = compare_columns(snapshot, options, &request, log.as_ref())?;
    match args.engine.format {
        OutputFormatArg::Table => print_comparison(&analysis),
        OutputFormatArg::Json => print_json(&analysis)?,
    }
    Ok(analysis)
}

pub fn run_dataset_overview(args: &DatasetOverviewArgs) -> Result<()> {
    let dataset = load_dataset(&args.dataset)?;
    let overview = dataset.overview();
    match args.format {
        OutputFormatArg::Table => print_overview(&overview),
        OutputFormatArg::Json => print_json(&overview)?,
    }
    Ok(())
}

pub fn run_dataset_analyze(args: &DatasetAnalyzeArgs, config: &Config) -> Result<DatasetAnalysis> {
    let span = info_span!("dataset", path = %args.dataset.display());
    let _guard = span.enter();
    let dataset = load_dataset(&args.dataset)?;
    let snapshot = catalog(config, args.engine.catalog.as_deref())?;
    let options = config.comparative_options(args.engine.exclusion_scope.map(Into::into));
    let log = detection_log(config, &args.engine);

    let analysis = analyze_dataset(snapshot, options, &dataset, args.limit, log.as_ref())?;
    match args.engine.format {
        OutputFormatArg::Table => print_dataset_analysis(&analysis),
        OutputFormatArg::Json => print_json(&analysis)?,
    }
    Ok(analysis)
}

pub fn run_keywords(args: &KeywordsArgs, config: &Config) -> Result<()> {
    let snapshot = catalog(config, args.catalog.as_deref())?;
    let association = args.association.map(SexAssociation::from);
    let keywords: Vec<_> = snapshot
        .sorted_keywords()
        .into_iter()
        .filter(|keyword| association.is_none_or(|a| keyword.sex_association == a))
        .collect();
    match args.format {
        OutputFormatArg::Table => print_keywords(&keywords),
        OutputFormatArg::Json => print_json(&keywords)?,
    }
    Ok(())
}

pub fn run_stats(args: &StatsArgs, config: &Config) -> Result<()> {
    let path = config
        .log_path(args.log.as_deref())
        .context("no detection log configured: pass --log or set [history] log")?;
    let log = DetectionLog::new(path);
    let stats = statistics(&log).with_context(|| format!("read {}", log.path().display()))?;
    match args.format {
        OutputFormatArg::Table => print_statistics(&stats),
        OutputFormatArg::Json => print_json(&stats)?,
    }
    Ok(())
}

fn catalog(config: &Config, flag: Option<&Path>) -> Result<CatalogSnapshot> {
    let dir = config.catalog_dir(flag);
    load_catalog(dir.as_deref()).context("load keyword catalog")
}

fn detection_log(config: &Config, args: &EngineArgs) -> Option<DetectionLog> {
    config.log_path(args.log.as_deref()).map(DetectionLog::new)
}

fn load_dataset(path: &Path) -> Result<GtDataset> {
    GtDataset::load(path).with_context(|| format!("load dataset {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{json}");
    Ok(())
}
