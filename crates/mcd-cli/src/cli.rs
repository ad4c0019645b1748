//! CLI argument definitions for `mcd-rules`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use mcd_ingest::TextEncoding;
use mcd_model::{DEFAULT_EFFECTIVE_DATE, DEFAULT_PROGRAM};

#[derive(Parser)]
#[command(
    name = "mcd-rules",
    version,
    about = "Build prior-authorization rule tables from CMS Medicare Coverage Database extracts",
    long_about = "Build prior-authorization rule tables from CMS Medicare Coverage Database \
                  article extracts.\n\n\
                  join:  article/code/contractor/state CSVs -> rules_joined.csv/.json\n\
                  flags: NCD/LCD target list -> flags CSV usable as a join overlay\n\
                  items: rules_joined.csv -> app items JSON"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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
}

#[derive(Subcommand)]
pub enum Command {
    /// Join CMS article tables into flat and per-code rule files.
    Join(JoinArgs),

    /// Derive a flags CSV from target NCD/LCD documents.
    Flags(FlagsArgs),

    /// Shape joined rules into the app items JSON.
    Items(ItemsArgs),
}

#[derive(Parser)]
pub struct JoinArgs {
    /// Directory containing the CMS MCD article CSV extracts.
    #[arg(long = "cms-dir", value_name = "DIR")]
    pub cms_dir: PathBuf,

    /// Optional flags CSV (cpt, requires_pa, program, effective_date, notes)
    /// merged onto the joined rules.
    #[arg(long = "wiser-codes", visible_alias = "gitcodes", value_name = "FILE")]
    pub wiser_codes: Option<PathBuf>,

    /// Output directory (created if absent).
    #[arg(long = "out", value_name = "DIR")]
    pub out: PathBuf,

    /// Force one input encoding instead of the fallback sequence.
    #[arg(long = "encoding", value_name = "NAME", value_parser = parse_encoding)]
    pub encoding: Option<TextEncoding>,
}

#[derive(Parser)]
pub struct FlagsArgs {
    /// Directory containing the CMS MCD article CSV extracts.
    #[arg(long = "cms-dir", value_name = "DIR")]
    pub cms_dir: PathBuf,

    /// Text file of NCD/LCD identifiers, one per line.
    #[arg(long = "targets", value_name = "FILE")]
    pub targets: PathBuf,

    /// Effective date written on every flag row.
    #[arg(long = "effective", value_name = "DATE", default_value = DEFAULT_EFFECTIVE_DATE)]
    pub effective: NaiveDate,

    /// Output flags CSV.
    #[arg(long = "out", value_name = "FILE")]
    pub out: PathBuf,
}

#[derive(Parser)]
pub struct ItemsArgs {
    /// rules_joined.csv produced by `join`.
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: PathBuf,

    /// Output items JSON.
    #[arg(long = "out", value_name = "FILE")]
    pub out: PathBuf,

    /// Two-letter state codes listed on every item.
    #[arg(
        long = "states",
        value_name = "CODE",
        num_args = 1..,
        required = true,
        value_parser = parse_state
    )]
    pub states: Vec<String>,

    /// Program name used in item ids.
    #[arg(long = "program", value_name = "NAME", default_value = DEFAULT_PROGRAM)]
    pub program: String,

    /// Effective date written on every item.
    #[arg(long = "effective", value_name = "DATE", default_value = DEFAULT_EFFECTIVE_DATE)]
    pub effective: NaiveDate,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_encoding(value: &str) -> Result<TextEncoding, String> {
    value.parse().map_err(|error: mcd_ingest::IngestError| error.to_string())
}

fn parse_state(value: &str) -> Result<String, String> {
    if value.len() == 2 && value.chars().all(|ch| ch.is_ascii_alphabetic()) {
        Ok(value.to_string())
    } else {
        Err(format!("expected a two-letter state code, got '{value}'"))
    }
}
