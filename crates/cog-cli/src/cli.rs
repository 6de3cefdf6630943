//! CLI argument definitions for the COG code resolver.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cog",
    version,
    about = "Resolve French administrative and NAF section names to official codes",
    long_about = "Resolve French administrative and activity names to official codes, and back.\n\n\
                  Regions, departements and communes use the INSEE Code Officiel Geographique;\n\
                  activity sections use NAF rev. 2 (A-U)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the reference CSV files (default: $INSEE_COG_DIR or data/).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Resolve a region name to its 2-digit code.
    Region(NameArgs),

    /// Resolve a departement name to its code.
    Departement(NameArgs),

    /// Resolve a commune name to its 5-character code.
    Commune(CommuneArgs),

    /// Resolve a NAF section label (or letter) to its code.
    Section(NameArgs),

    /// Look up the canonical name for a code.
    Name(CodeArgs),

    /// List every region, departement or section.
    List(ListArgs),

    /// List communes whose name contains a pattern.
    Search(SearchArgs),

    /// Translate search filters (names or codes) into codes.
    Filters(FiltersArgs),

    /// Check the reference data files.
    Doctor(OutputArgs),
}

#[derive(Args)]
pub struct OutputArgs {
    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct NameArgs {
    /// Name or label to resolve.
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Args)]
pub struct CommuneArgs {
    /// Commune name.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Departement code or name used to disambiguate.
    #[arg(long = "departement", short = 'd', value_name = "DEPARTEMENT")]
    pub departement: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct CodeArgs {
    /// Kind of code.
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Code to look up.
    #[arg(value_name = "CODE")]
    pub code: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Table to list.
    #[arg(value_enum)]
    pub table: TableArg,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Part of a commune name.
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Restrict to one departement (code or name).
    #[arg(long = "departement", short = 'd', value_name = "DEPARTEMENT")]
    pub departement: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct FiltersArgs {
    #[arg(long = "region", value_name = "REGION")]
    pub region: Option<String>,

    #[arg(long = "departement", short = 'd', value_name = "DEPARTEMENT")]
    pub departement: Option<String>,

    #[arg(long = "commune", value_name = "COMMUNE")]
    pub commune: Option<String>,

    /// NAF section label or letter.
    #[arg(long = "section", value_name = "SECTION")]
    pub section: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Region,
    Departement,
    Commune,
    Section,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TableArg {
    Regions,
    Departements,
    Sections,
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
