//! MCD rules CLI.

use std::io::{self, IsTerminal};

use chrono::Utc;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use mcd_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use mcd_cli::commands::{run_flags, run_items, run_join};
use mcd_cli::logging::{LogConfig, LogFormat, init_logging};

mod summary;

use crate::summary::{print_flags_summary, print_items_summary, print_join_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match &cli.command {
        Command::Join(args) => run_join(args).map(|result| print_join_summary(&result)),
        Command::Flags(args) => run_flags(args).map(|result| print_flags_summary(&result)),
        Command::Items(args) => {
            run_items(args, Utc::now().date_naive()).map(|result| print_items_summary(&result))
        }
    };
    let exit_code = match outcome {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
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
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
