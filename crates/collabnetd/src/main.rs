//! Command line interface for the collabnet collection pipeline.
//!
//! This crate provides a CLI tool for collecting academic papers and
//! analyzing co-authorship networks using the `collabnet` library. It
//! supports:
//! - Database and configuration initialization
//! - Multi-source collection by author or keyword, with optional network
//!   expansion
//! - Collaboration network analysis printed to standard output
//!
//! # Usage
//!
//! ```bash
//! # Initialize the database and a default config
//! collabnet init
//!
//! # Collect papers for two seed authors and expand through co-authors
//! collabnet collect --email you@example.com \
//!     --authors "A. Smith" "B. Jones" --expand --analysis
//!
//! # Collect papers matching keywords
//! collabnet collect --email you@example.com --keywords "graph theory"
//!
//! # Analyze the stored collaboration network
//! collabnet analyze
//! ```
//!
//! Verbosity is controlled with repeated `-v` flags.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use clap::{builder::ArgAction, Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;

use crate::{commands::*, error::*};

/// Prefix for information messages
static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
static ERROR_PREFIX: &str = "✗ ";
/// Branch character for tree structure
static TREE_BRANCH: &str = "├";
/// Leaf character for tree structure (end of branch)
static TREE_LEAF: &str = "└";

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "CLI for the collabnet collection pipeline")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the database file. If not specified, uses the configured or
  /// default platform-specific data directory.
  #[arg(long, short, global = true)]
  path: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

/// Configures the logging system based on the verbosity level
///
/// # Arguments
///
/// * `verbosity` - Number of times the verbose flag was used (0-3)
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

/// Entry point for the collabnet CLI application
///
/// Handles command line argument parsing, sets up logging, and executes
/// the requested command.
///
/// # Errors
///
/// Returns [`CollabnetdError`] for various failure conditions including:
/// - Database operation failures
/// - Missing or invalid collection inputs
/// - File system errors
#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  match cli.command.clone() {
    Commands::Init => init(&cli).await,
    Commands::Collect(collect_options) => collect(&cli, collect_options).await,
    Commands::Analyze => analyze(&cli).await,
  }
}
