//! Multi-source academic paper collection and co-authorship network synthesis.
//!
//! `collabnet` collects paper metadata from several external sources,
//! deduplicates it into a local store, and derives a weighted co-authorship
//! graph that can be queried for network statistics. It provides:
//!
//! - Source collectors for arXiv, PubMed, and Semantic Scholar
//! - Per-source rate limiting and best-effort failure isolation
//! - Identifier-priority deduplication and merge on store
//! - An incremental collaboration graph over author identities
//! - Iterative breadth-first expansion of the author network
//! - Graph-theoretic summary statistics
//!
//! # Getting Started
//!
//! ```no_run
//! use collabnet::{
//!   analysis, database::Database, graph::CollaborationGraph, harvest::Harvester,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   // Create or open a database
//!   let mut db = Database::open(Database::default_path()).await?;
//!
//!   // Collect papers for a set of seed authors, expanding to co-authors
//!   let harvester = Harvester::with_default_sources("you@example.com");
//!   let report = harvester.collect_authors(&mut db, &["A. Smith".into()], true).await?;
//!   println!("Stored {} new papers", report.papers_stored);
//!
//!   // Summarize the collaboration network
//!   let graph = CollaborationGraph::load(&mut db).await?;
//!   let summary = analysis::summarize(&graph);
//!   println!("{} authors, {} collaborations", summary.author_count, summary.collaboration_count);
//!
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`paper`]: Canonical paper and author metadata types
//! - [`collector`]: Source-specific API collectors and response normalization
//! - [`limiter`]: Per-source sliding-window rate limiting
//! - [`database`]: Deduplicating store and typed database operations
//! - [`graph`]: Collaboration graph built from stored collaborations
//! - [`analysis`]: Network summary statistics over a graph snapshot
//! - [`harvest`]: Multi-round author network expansion orchestrator
//! - [`config`]: On-disk configuration handling
//! - [`prelude`]: Common traits and types for ergonomic imports
//!
//! # Design Philosophy
//!
//! Collection is best effort per source: a failed or timed-out call to one
//! source is logged and yields no papers, while the other sources in the same
//! round proceed untouched. Storage is merge-on-conflict: a paper that
//! resolves to an existing record by identifier priority is returned as-is
//! rather than duplicated or overwritten.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  fmt::Display,
  path::{Path, PathBuf},
  str::FromStr,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub mod analysis;
pub mod collector;
pub mod config;
pub mod database;
pub mod error;
pub mod graph;
pub mod harvest;
pub mod limiter;
pub mod paper;

use crate::error::*;

/// Common traits and types for ergonomic imports.
///
/// Brings the pieces needed by nearly every caller into scope with one glob
/// import:
///
/// ```no_run
/// use collabnet::prelude::*;
/// ```
///
/// # Contents
///
/// - [`Collector`](crate::collector::Collector): capability trait for paper sources
/// - [`DatabaseInstruction`](crate::database::DatabaseInstruction): trait for typed store operations
/// - [`CollabnetError`]: core error type for the library
pub mod prelude {
  pub use crate::{
    collector::Collector, database::DatabaseInstruction, error::CollabnetError,
  };
}
