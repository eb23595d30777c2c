//! CLI argument definitions for the BDSICE browser.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "bdsice",
    version,
    about = "Query a local copy of the BDSICE statistical series database",
    long_about = "Query a local copy of the BDSICE statistical series database.\n\n\
                  Raw .xer files are decoded into per-series JSON records and a\n\
                  code/title index that the search, info and random commands read."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Database directory (overrides `database_path` in settings.toml).
    #[arg(long = "db", value_name = "DIR", global = true)]
    pub db: Option<PathBuf>,

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
    /// Decode every .xer file and rewrite the series records and index.
    Rebuild(RebuildArgs),

    /// Find series whose code or title contains every term.
    ///
    /// Terms starting with `-` exclude matches, e.g. `indice -precio`.
    Search(SearchArgs),

    /// Show metadata of one or more series.
    Info(InfoArgs),

    /// Show metadata of a randomly chosen series.
    Random,
}

#[derive(Parser)]
pub struct RebuildArgs {
    /// Stop at the first file that fails to decode.
    #[arg(long = "strict", conflicts_with = "skip_invalid")]
    pub strict: bool,

    /// Skip files that fail to decode.
    #[arg(long = "skip-invalid")]
    pub skip_invalid: bool,
}

#[derive(Parser)]
pub struct SearchArgs {
    /// Search terms. Accents and letter case are ignored for titles.
    #[arg(
        value_name = "TERM",
        required = true,
        num_args = 1..,
        allow_hyphen_values = true
    )]
    pub terms: Vec<OsString>,
}

#[derive(Parser)]
pub struct InfoArgs {
    /// Series codes.
    #[arg(value_name = "CODE", required = true, num_args = 1..)]
    pub codes: Vec<String>,
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
