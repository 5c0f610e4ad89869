//! Deduplicating SQLite store for papers, authors, and collaborations.
//!
//! This module persists collected paper metadata and the derived
//! co-authorship relations in a local SQLite database. It provides:
//! - Merge-on-store paper persistence with identifier-priority lookup
//! - Author records keyed by exact name
//! - Collaboration rows aggregated per unordered author pair
//! - Named collections for organizing papers
//!
//! Operations are expressed as [`DatabaseInstruction`] values executed
//! against a [`Database`] handle, so callers compose typed instructions
//! instead of writing SQL:
//!
//! ```no_run
//! use collabnet::{database::{Database, Query, Save}, prelude::*};
//! # use collabnet::paper::Paper;
//!
//! # async fn example(paper: Paper) -> Result<(), Box<dyn std::error::Error>> {
//! let mut db = Database::open("papers.db").await?;
//! let (stored, created) = Save::paper(&paper).execute(&mut db).await?;
//! let all = Query::list_all().execute(&mut db).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The schema is initialized from `migrations/init.sql` whenever a
//! database is opened.

use tokio_rusqlite::Connection;

use super::*;

pub mod instruction;
pub mod models;

pub use self::{instruction::*, models::*};

/// Handle for interacting with the paper and collaboration store.
///
/// Manages an async connection to a SQLite database. The schema is applied
/// on open, so a fresh path becomes a working empty store.
pub struct Database {
  /// Async SQLite connection handle
  pub(crate) conn: Connection,
}

impl Database {
  /// Opens an existing database or creates a new one at the specified path.
  ///
  /// # Examples
  ///
  /// ```no_run
  /// # use collabnet::database::Database;
  /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
  /// // Open in a specific location
  /// let db = Database::open("papers.db").await?;
  ///
  /// // Or use the default location
  /// let db = Database::open(Database::default_path()).await?;
  /// # Ok(())
  /// # }
  /// ```
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = Connection::open(path.as_ref().to_path_buf()).await?;

    // Initialize schema
    conn
      .call(|conn| {
        conn.execute_batch(include_str!(concat!(
          env!("CARGO_MANIFEST_DIR"),
          "/migrations/init.sql"
        )))?;
        Ok(())
      })
      .await?;

    Ok(Self { conn })
  }

  /// Returns the default path for the database file.
  ///
  /// The path is constructed as follows:
  /// - On Unix: `~/.local/share/collabnet/collabnet.db`
  /// - On macOS: `~/Library/Application Support/collabnet/collabnet.db`
  /// - On Windows: `%APPDATA%\collabnet\collabnet.db`
  /// - Fallback: `./collabnet.db` in the current directory
  pub fn default_path() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("collabnet").join("collabnet.db")
  }
}
