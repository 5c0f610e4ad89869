//! Error types for the collabnet CLI.

use thiserror::Error;

/// Error type alias used for the CLI crate.
pub type Result<T> = core::result::Result<T, CollabnetdError>;

/// Errors surfaced by CLI commands.
///
/// Library failures pass through transparently; the CLI adds only the
/// input-handling failures that happen before the library is reached.
#[derive(Error, Debug)]
pub enum CollabnetdError {
  /// An error from the underlying collabnet library.
  #[error(transparent)]
  Collabnet(#[from] collabnet::error::CollabnetError),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// An interactive prompt failed.
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// The invocation was missing a required input.
  #[error("{0}")]
  Input(String),
}
