//! Gender mismatch detector CLI.

use clap::{ColorChoice, Parser};
use gmd_cli::config::Config;
use gmd_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, DatasetCommand, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_compare, run_dataset_analyze, run_dataset_overview, run_detect, run_keywords, run_stats,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let config = match Config::discover(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    let result = match &cli.command {
        Command::Detect(args) => {
            run_detect(args, &config).map(|outcome| outcome.result.has_high_priority())
        }
        Command::Compare(args) => run_compare(args, &config)
            .map(|analysis| analysis.overall_summary.priority == gmd_model::Priority::High),
        Command::Dataset(DatasetCommand::Overview(args)) => {
            run_dataset_overview(args).map(|()| false)
        }
        Command::Dataset(DatasetCommand::Analyze(args)) => {
            run_dataset_analyze(args, &config).map(|_| false)
        }
        Command::Keywords(args) => run_keywords(args, &config).map(|()| false),
        Command::Stats(args) => run_stats(args, &config).map(|()| false),
    };
    let exit_code = match result {
        Ok(high_priority) => i32::from(high_priority),
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default()
        .with_level_filter(cli.verbosity.tracing_level_filter())
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data);
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config = config.with_format(match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    });
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
