//! On-disk configuration for collection runs.
//!
//! A small TOML file holds the values an operator sets once and forgets:
//! the database location, the contact email passed to the sources that
//! require one, and the default collection bounds. CLI flags override
//! whatever is loaded from here.

use super::*;

/// Configuration for the collabnet pipeline.
///
/// # Examples
///
/// ```no_run
/// use collabnet::config::Config;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default().with_email("you@example.com");
/// config.write(Config::default_path())?;
///
/// let loaded = Config::load(Config::default_path())?;
/// assert_eq!(loaded.email.as_deref(), Some("you@example.com"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
  /// Where the SQLite database lives
  pub database_path:         PathBuf,
  /// Operator contact email for external API etiquette
  pub email:                 Option<String>,
  /// Default per-author result cap for seed authors
  pub max_papers_per_author: usize,
  /// Default number of expansion rounds
  pub expansion_rounds:      usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      database_path:         crate::database::Database::default_path(),
      email:                 None,
      max_papers_per_author: 50,
      expansion_rounds:      2,
    }
  }
}

impl Config {
  /// Returns the default path for the configuration file.
  ///
  /// The path is constructed as follows:
  /// - On Unix: `~/.config/collabnet/config.toml`
  /// - On macOS: `~/Library/Application Support/collabnet/config.toml`
  /// - On Windows: `%APPDATA%\collabnet\config.toml`
  /// - Fallback: `./config.toml` in the current directory
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("collabnet").join("config.toml")
  }

  /// Loads configuration from a TOML file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
  }

  /// Writes this configuration to a TOML file, creating parent
  /// directories as needed.
  pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(self)?)?;
    Ok(())
  }

  /// Sets the database location.
  pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.database_path = path.into();
    self
  }

  /// Sets the operator email.
  pub fn with_email(mut self, email: impl Into<String>) -> Self {
    self.email = Some(email.into());
    self
  }
}
