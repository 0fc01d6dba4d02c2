// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Locale;

/// formcheck - popup form validation
///
/// Loads a page description, simulates typing into its forms and reports
/// which fields are invalid and whether each form can be submitted.
#[derive(Parser, Debug)]
#[command(name = "formcheck")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Validate popup forms the way the gallery page does", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Language of validation messages (overrides the configuration)
    #[arg(long, global = true, value_enum, env = "FORMCHECK_LOCALE")]
    pub locale: Option<Locale>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Type values into a page's fields and report form state
    Check(CheckArgs),

    /// Fill one form interactively
    Fill(FillArgs),

    /// Write an example configuration and page description
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the check command.
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Page description (TOML)
    pub page: PathBuf,

    /// Type VALUE into the field with id FIELD; repeatable, applied in order
    #[arg(short, long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,

    /// Only report the form with this id
    #[arg(long)]
    pub form: Option<String>,

    /// Exit with an error when any reported form cannot be submitted
    #[arg(long)]
    pub fail_on_invalid: bool,
}

/// Arguments for the fill command.
#[derive(Parser, Debug, Clone)]
pub struct FillArgs {
    /// Page description (TOML)
    pub page: PathBuf,

    /// Id of the form to fill
    #[arg(long)]
    pub form: String,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing files
    #[arg(short, long)]
    pub force: bool,

    /// Directory to write into (defaults to the current directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

/// Parse a `FIELD=VALUE` pair. The value may be empty or contain `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.is_empty() => Ok((field.to_string(), value.to_string())),
        _ => Err(format!("expected FIELD=VALUE, got '{}'", raw)),
    }
}
