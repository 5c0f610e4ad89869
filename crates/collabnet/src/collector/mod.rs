//! Source-specific paper collectors.
//!
//! Each external paper database gets one concrete implementation of the
//! [`Collector`] capability trait. Callers hold collectors as trait objects
//! and never branch on the concrete source; results carry their
//! [`PaperSource`] tag instead.
//!
//! Failure policy: a collector reports transport and parse failures as
//! errors so the caller can distinguish "zero results" (`Ok` with an empty
//! vector) from "the call failed" (`Err`). The harvesting loop converts
//! failures into empty result sets after logging them, so one source's
//! outage never aborts collection from the others.
//!
//! # Examples
//!
//! ```no_run
//! use collabnet::collector::{ArxivCollector, Collector};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let arxiv = ArxivCollector::new();
//! let papers = arxiv.search_by_author("Grothendieck", 10).await?;
//! for paper in papers {
//!   println!("{}", paper.title);
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;

use super::*;
use crate::{limiter::RateLimit, paper::*};

mod arxiv;
mod normalize;
mod pubmed;
mod semantic_scholar;

pub use self::{
  arxiv::ArxivCollector, normalize::parse_publication_date, pubmed::PubmedCollector,
  semantic_scholar::SemanticScholarCollector,
};

/// Per-call deadline applied to every outbound source request.
///
/// An expired deadline surfaces as a [`CollabnetError::Network`] and is
/// recovered like any other transient source failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Capability interface for querying one external paper database.
///
/// Implementations normalize their source's responses into canonical
/// [`Paper`] values and enforce their own rate limit internally; callers
/// simply await the search methods in sequence.
#[async_trait]
pub trait Collector: Send + Sync {
  /// The source tag attached to every paper this collector returns.
  fn source(&self) -> PaperSource;

  /// Searches papers by author name.
  ///
  /// Returns at most `max_results` papers, newest first where the source
  /// supports ordering. `Ok(vec![])` means the author matched nothing;
  /// `Err` means the call itself failed.
  async fn search_by_author(&self, name: &str, max_results: usize) -> Result<Vec<Paper>>;

  /// Searches papers by a set of keywords.
  ///
  /// Sources differ in how faithfully they support keyword filtering; see
  /// each implementation for the exact query semantics.
  async fn search_by_keywords(&self, keywords: &[String], max_results: usize)
    -> Result<Vec<Paper>>;
}

/// Builds the HTTP client shared by the concrete collectors.
///
/// One client per collector keeps connection pools per source and applies
/// the per-call deadline uniformly.
fn http_client() -> reqwest::Client {
  reqwest::Client::builder()
    .timeout(REQUEST_TIMEOUT)
    .build()
    .unwrap_or_else(|_| reqwest::Client::new())
}
