//! INSEE COG code resolver CLI.

use clap::{ColorChoice, Parser};
use cog_cli::logging::{LogConfig, LogFormat, init_logging};
use cog_codes::{CogConfig, CogContext};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_commune, run_departement, run_doctor, run_filters, run_list, run_name, run_region,
    run_search, run_section,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let explicit;
    let cog: &CogContext = match &cli.data_dir {
        Some(dir) => {
            explicit = CogContext::new(CogConfig::from_dir(dir));
            &explicit
        }
        None => cog_codes::global(),
    };

    let result = match &cli.command {
        Command::Region(args) => run_region(cog, args),
        Command::Departement(args) => run_departement(cog, args),
        Command::Commune(args) => run_commune(cog, args),
        Command::Section(args) => run_section(cog, args),
        Command::Name(args) => run_name(cog, args),
        Command::List(args) => run_list(cog, args),
        Command::Search(args) => run_search(cog, args),
        Command::Filters(args) => run_filters(cog, args),
        Command::Doctor(args) => run_doctor(cog, args),
    };
    let exit_code = match result {
        Ok(outcome) => outcome.exit_code(),
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
