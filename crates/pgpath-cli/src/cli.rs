//! pgpath command line interface
//!
//! Correlates PostgreSQL EXPLAIN plans with planner debug logs and writes a
//! pathcost text file and a path cost spreadsheet per plan.

mod commands;
mod logging;
mod output;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::commands::analyze::AnalyzeArgs;
use crate::commands::convert::ConvertArgs;
use crate::commands::stage::StageArgs;
use crate::logging::LoggingConfig;
use crate::settings::PgpathSettings;

/// Planner path-cost reports for PostgreSQL queries
#[derive(Parser, Debug)]
#[command(name = "pgpath")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (defaults to ./pgpath.toml when present)
    #[arg(short, long, env = "PGPATH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Verbose logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// One JSON object per event
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Correlate plan files with a planner log and write reports
    Analyze(AnalyzeArgs),

    /// Move each staged plan into its own directory with the newest log, then analyze it
    Stage(StageArgs),

    /// Rebuild a spreadsheet from a pathcost text file
    Convert(ConvertArgs),
}

impl Cli {
    fn logging_config(&self, settings: &PgpathSettings) -> LoggingConfig {
        let mut config = if self.verbose {
            LoggingConfig::development()
        } else if self.quiet {
            LoggingConfig::quiet()
        } else {
            LoggingConfig {
                default_filter: settings.logging.filter.clone(),
                ..LoggingConfig::default()
            }
        };
        config.json = match self.log_format {
            Some(format) => format == LogFormat::Json,
            None => settings.logging.json,
        };
        config
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = PgpathSettings::load(cli.config.as_deref())?;
    logging::init(&cli.logging_config(&settings))?;

    match &cli.command {
        Commands::Analyze(args) => commands::analyze::run(args, &settings),
        Commands::Stage(args) => commands::stage::run(args, &settings),
        Commands::Convert(args) => commands::convert::run(args, &settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_format_overrides_settings() {
        let cli = Cli::parse_from(["pgpath", "--log-format", "json", "convert", "q1_pathcost.txt"]);
        let config = cli.logging_config(&PgpathSettings::default());
        assert!(config.json);
        assert_eq!(config.default_filter, "info");
    }

    #[test]
    fn test_settings_filter_is_used() {
        let cli = Cli::parse_from(["pgpath", "analyze", "plans", "--log", "pg.log"]);
        let mut settings = PgpathSettings::default();
        settings.logging.filter = "pgpath_analyzer=debug".to_string();
        settings.logging.json = true;

        let config = cli.logging_config(&settings);
        assert_eq!(config.default_filter, "pgpath_analyzer=debug");
        assert!(config.json);
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["pgpath", "-v", "-q", "convert", "x.txt"]).is_err());
    }
}
