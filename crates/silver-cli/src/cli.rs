//! Command line arguments for `silver`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "silver",
    version,
    about = "Reconcile multi-source bronze patient files into one silver table",
    long_about = "Reconcile patient records exported by several source organizations.\n\n\
                  Each source is described by an adapter in a TOML file: column mapping,\n\
                  date layouts, and gender/status synonyms. Output is one silver CSV\n\
                  plus a findings report of every data-quality problem."
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

    /// Allow raw patient values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile the bronze files in a folder and write silver outputs.
    Run(RunArgs),

    /// List the source adapters in a sources file.
    Sources(SourcesArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Folder containing one bronze CSV per configured source.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Sources file describing each adapter.
    #[arg(long = "config", value_name = "FILE")]
    pub config: PathBuf,

    /// Output directory (default: <INPUT_DIR>/silver).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Processing date for birth date checks (default: today).
    #[arg(long = "as-of", value_name = "YYYY-MM-DD")]
    pub as_of: Option<String>,

    /// Findings report format.
    #[arg(long = "findings-format", value_enum, default_value = "json")]
    pub findings_format: FindingsFormatArg,

    /// Reconcile and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Reject rows whose birth date cannot be used.
    #[arg(long = "strict-dob")]
    pub strict_dob: bool,

    /// Reject rows whose phone number cannot be used.
    #[arg(long = "strict-phone")]
    pub strict_phone: bool,

    /// Reconcile sources one at a time.
    #[arg(long = "sequential")]
    pub sequential: bool,
}

#[derive(Parser)]
pub struct SourcesArgs {
    /// Sources file describing each adapter.
    #[arg(long = "config", value_name = "FILE")]
    pub config: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FindingsFormatArg {
    Json,
    Csv,
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
