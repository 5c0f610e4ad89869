//! CLI subcommand implementations.

use clap::Args;
use collabnet::{config::Config, database::Database};

use super::*;

pub mod analyze;
pub mod collect;
pub mod init;

pub use analyze::{analyze, print_summary};
pub use collect::collect;
pub use init::init;

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Initialize the collabnet database and default configuration
  Init,

  /// Collect papers by author or keyword from the configured sources
  Collect(collect::CollectOptions),

  /// Print summary statistics of the stored collaboration network
  Analyze,
}

/// Loads the on-disk configuration, falling back to defaults when absent.
fn load_config() -> Config {
  Config::load(Config::default_path()).unwrap_or_default()
}

/// Resolves the database path from the CLI override or configuration.
fn database_path(cli: &Cli, config: &Config) -> PathBuf {
  cli.path.clone().unwrap_or_else(|| config.database_path.clone())
}

/// Opens the database, creating its parent directory first.
async fn open_database(cli: &Cli, config: &Config) -> Result<Database> {
  let path = database_path(cli, config);
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  Ok(Database::open(&path).await?)
}
