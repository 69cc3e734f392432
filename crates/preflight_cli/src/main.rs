//! Preflight CLI: upgrade readiness checks for a data science platform cluster.
//!
//! Provides `preflight run` to evaluate checks against a cluster snapshot and
//! `preflight list` to show which checks a selection resolves to.

#![warn(missing_docs)]

mod list;
mod logging;
mod run;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use preflight_common::Version;

/// Preflight: checks a cluster before a platform upgrade.
#[derive(Parser, Debug)]
#[command(name = "preflight", version, about = "Upgrade preflight checks")]
pub struct Cli {
    /// Suppress all output except errors and results.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `preflight.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the selected checks and report their results.
    Run(RunArgs),
    /// List the checks a selection resolves to.
    List(ListArgs),
}

/// Arguments for the `preflight run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Selection pattern: `*`, a category name, a check ID, or a glob.
    pub pattern: Option<String>,

    /// Only run checks in this category.
    #[arg(long)]
    pub category: Option<String>,

    /// The version the cluster runs now.
    #[arg(long)]
    pub current_version: Option<Version>,

    /// The version to upgrade to. Omit for a lint-only run.
    #[arg(long)]
    pub target_version: Option<Version>,

    /// JSON cluster snapshot to read resources from.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Output format for results.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Worker threads for check execution.
    #[arg(long)]
    pub workers: Option<usize>,

    /// Deadline for the whole run, in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Arguments for the `preflight list` subcommand.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Selection pattern: `*`, a category name, a check ID, or a glob.
    pub pattern: Option<String>,

    /// Only list checks in this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Output format for the listing.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stdout().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    logging::init(&global);

    let result = match cli.command {
        Command::Run(ref args) => run::run(args, &global),
        Command::List(ref args) => list::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    }
}

/// Loads the configuration named by `--config`, or `preflight.toml` from the
/// working directory when present.
fn load_config(
    global: &GlobalArgs,
) -> Result<preflight_config::ProjectConfig, Box<dyn std::error::Error>> {
    let config = match &global.config {
        Some(path) => preflight_config::load_config_file(path)?,
        None => preflight_config::load_config_or_default(&std::env::current_dir()?)?,
    };
    Ok(config)
}

/// Validates a category filter; empty means every category.
fn parse_category(category: &str) -> Result<String, preflight_checks::ParseGroupError> {
    if !category.is_empty() {
        category.parse::<preflight_checks::CheckGroup>()?;
    }
    Ok(category.to_string())
}
