//! Error types for the collabnet library.
//!
//! This module provides a comprehensive error type that encompasses all
//! possible failure modes when collecting and storing papers, including:
//! - Network and API errors from the external sources
//! - Database operations
//! - Input validation
//! - Configuration handling
//!
//! # Examples
//!
//! ```
//! use collabnet::{error::CollabnetError, paper::PaperSource};
//! use std::str::FromStr;
//!
//! let result = PaperSource::from_str("sci-hub");
//! assert!(matches!(result, Err(CollabnetError::InvalidSource(_))));
//! ```

use thiserror::Error;

/// Error type alias used for the [`collabnet`](crate) crate.
pub type Result<T> = core::result::Result<T, CollabnetError>;

/// Errors that can occur when collecting papers and building the
/// collaboration network.
///
/// Transient per-call failures ([`CollabnetError::Network`],
/// [`CollabnetError::Api`]) are recovered by the harvesting loop: the failed
/// call yields no papers and the run continues. Storage-side errors surface
/// per candidate and are likewise tolerated by the orchestrator, while
/// read-side query failures propagate since the run cannot proceed without
/// them.
#[derive(Error, Debug)]
pub enum CollabnetError {
  /// A network request failed.
  ///
  /// This can occur when:
  /// - The network is unavailable
  /// - The server is unreachable
  /// - The request times out (the per-call deadline expired)
  /// - TLS errors occur
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// An external API returned an error response or an unparseable payload.
  ///
  /// The string parameter carries the upstream status or parse failure for
  /// debugging.
  #[error("API error: {0}")]
  Api(String),

  /// The provided source type string couldn't be parsed.
  ///
  /// This typically occurs when reading records back from the database and
  /// the stored source tag doesn't match any known variant.
  #[error("Invalid source type, see `collabnet::paper::PaperSource`")]
  InvalidSource(String),

  /// A SQLite operation failed.
  ///
  /// This wraps errors from the `rusqlite` crate, covering SQL errors,
  /// constraint violations, and type conversion failures.
  #[error(transparent)]
  Sqlite(#[from] rusqlite::Error),

  /// An async SQLite operation failed.
  ///
  /// This wraps errors from the `tokio-rusqlite` crate, covering
  /// async-specific failures in database operations.
  #[error(transparent)]
  AsyncSqlite(#[from] tokio_rusqlite::Error),

  /// Serialized keyword or institution lists couldn't be encoded or decoded.
  #[error(transparent)]
  Serialization(#[from] serde_json::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// The caller supplied an empty author or keyword list.
  ///
  /// Collection requires at least one seed; an empty request is rejected at
  /// the entry boundary rather than silently collecting nothing.
  #[error("Cannot collect with an empty {0} list")]
  EmptySeed(&'static str),

  /// Configuration file parsing failed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// Configuration file serialization failed.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// A configuration value was missing or invalid.
  #[error("{0}")]
  Config(String),
}
