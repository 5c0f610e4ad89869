#![allow(missing_docs, clippy::missing_docs_in_private_items)]

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use super::*;

pub mod collection;
pub mod query;
pub mod save;

pub use self::{collection::*, query::*, save::*};

/// A typed operation against the [`Database`].
///
/// Instructions carry their parameters, execute inside the connection's
/// worker, and return a typed output, keeping SQL out of calling code.
#[async_trait]
pub trait DatabaseInstruction {
  type Output;

  // Take &mut reference to avoid taking ownership and allow multiple operations
  async fn execute(&self, db: &mut Database) -> Result<Self::Output>;
}
