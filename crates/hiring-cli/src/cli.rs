//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "hiring",
    version,
    about = "Hiring round statistics - cohort aggregation and saved calculations",
    long_about = "Compute per-group statistics of a hiring round from exported \
                  candidate rows and manage the round's saved calculation."
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

    /// Log output format.
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

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the emitting module in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute statistics and print them without saving.
    Stats(StatsArgs),

    /// Manage the saved calculation of a round.
    #[command(subcommand)]
    Snapshot(SnapshotCommand),
}

#[derive(Args)]
pub struct StatsArgs {
    /// Candidate rows (.csv or .json).
    #[arg(long = "rows", value_name = "PATH")]
    pub rows: PathBuf,

    /// Round configuration (.toml or .json).
    #[arg(long = "config", value_name = "PATH")]
    pub config: PathBuf,

    /// Print the statistics as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum SnapshotCommand {
    /// Compute and save, replacing any earlier calculation of the round.
    Save(SaveArgs),

    /// Print the saved calculation.
    Show(ShowArgs),

    /// Delete the saved calculation.
    Delete(StoreArgs),
}

#[derive(Args)]
pub struct StoreArgs {
    /// Round configuration naming the round and its project.
    #[arg(long = "config", value_name = "PATH")]
    pub config: PathBuf,

    /// Directory holding saved calculations.
    #[arg(long = "store", value_name = "DIR", default_value = "calc-store")]
    pub store: PathBuf,

    /// Act as this project (default: the round's own project).
    #[arg(long = "project", value_name = "ID")]
    pub project: Option<u64>,
}

#[derive(Args)]
pub struct SaveArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Candidate rows (.csv or .json).
    #[arg(long = "rows", value_name = "PATH")]
    pub rows: PathBuf,

    /// Snapshot name (default: the config's name, else "기본 분석").
    #[arg(long = "name")]
    pub name: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Check whether the snapshot was computed from these rows.
    #[arg(long = "rows", value_name = "PATH")]
    pub rows: Option<PathBuf>,

    /// Print the stored record as JSON.
    #[arg(long = "json")]
    pub json: bool,
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
