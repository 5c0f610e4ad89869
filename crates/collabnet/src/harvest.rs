//! Multi-round author network expansion orchestrator.
//!
//! The [`Harvester`] drives collection as a sequence of discovery rounds:
//! a seed round over the caller-supplied authors, then up to
//! [`HarvestOptions::expansion_rounds`] breadth-first rounds over the most
//! frequent not-yet-visited co-authors in the stored graph. Each round
//! fans out over every configured [`Collector`], stores whatever comes
//! back through the deduplicating [`Save`] instruction, and accumulates
//! counters into a [`HarvestReport`].
//!
//! Failure isolation: a failed source call is logged and contributes no
//! papers; a failed store of one candidate is logged and skipped. Neither
//! aborts the run. Only read-side query failures propagate, since the
//! expansion cannot continue without them.
//!
//! The visited set is threaded through the run rather than kept on the
//! struct, so concurrent or repeated runs of the same harvester are
//! independent.

use std::{collections::HashSet, time::Duration};

use tokio::time::sleep;

use super::*;
use crate::{
  collector::{ArxivCollector, Collector, PubmedCollector, SemanticScholarCollector},
  database::{AuthorFrequency, Database, DatabaseInstruction, Save},
  paper::Paper,
};

/// Tuning knobs for a harvesting run.
#[derive(Debug, Clone)]
pub struct HarvestOptions {
  /// Result cap per seed author and per keyword query
  pub max_papers_per_author: usize,
  /// Maximum number of expansion rounds after the seed round
  pub expansion_rounds:      usize,
  /// Reduced result cap per author during expansion rounds
  pub expansion_paper_cap:   usize,
  /// How many top-frequency authors to consider as candidates
  pub frequency_pool:        usize,
  /// How many candidates are actually fetched per expansion round
  pub expansion_author_cap:  usize,
  /// Courtesy delay between sequential author fetches within a round
  pub author_delay:          Duration,
}

impl Default for HarvestOptions {
  fn default() -> Self {
    Self {
      max_papers_per_author: 50,
      expansion_rounds:      2,
      expansion_paper_cap:   20,
      frequency_pool:        20,
      expansion_author_cap:  10,
      author_delay:          Duration::from_secs(2),
    }
  }
}

/// Aggregate counters for one harvesting run.
///
/// Failed candidates are counted but not included in the stored totals,
/// so `papers_seen == papers_stored + papers_merged + papers_failed`.
#[derive(Debug, Clone, Default)]
pub struct HarvestReport {
  /// Papers returned by collectors across all rounds
  pub papers_seen:      usize,
  /// Papers newly inserted into the store
  pub papers_stored:    usize,
  /// Papers that resolved to an already-stored record
  pub papers_merged:    usize,
  /// Papers whose store attempt failed
  pub papers_failed:    usize,
  /// Authors fetched across all rounds
  pub authors_visited:  usize,
  /// Expansion rounds that actually ran
  pub rounds_completed: usize,
}

/// Orchestrator for multi-source, multi-round paper collection.
///
/// # Examples
///
/// ```no_run
/// use collabnet::{database::Database, harvest::Harvester};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut db = Database::open(Database::default_path()).await?;
/// let harvester = Harvester::with_default_sources("you@example.com");
///
/// let report =
///   harvester.collect_authors(&mut db, &["A. Smith".to_string()], true).await?;
/// println!("{} new papers", report.papers_stored);
/// # Ok(())
/// # }
/// ```
pub struct Harvester {
  /// The sources queried each round, in fan-out order
  collectors: Vec<Box<dyn Collector>>,
  /// Tuning knobs for this harvester
  options:    HarvestOptions,
}

impl Harvester {
  /// Creates a harvester over an explicit collector set.
  ///
  /// Tests inject stub collectors here; production callers usually want
  /// [`Harvester::with_default_sources`].
  pub fn new(collectors: Vec<Box<dyn Collector>>, options: HarvestOptions) -> Self {
    Self { collectors, options }
  }

  /// Creates a harvester over the three production sources with default
  /// options.
  pub fn with_default_sources(email: &str) -> Self {
    Self::new(
      vec![
        Box::new(ArxivCollector::new()),
        Box::new(PubmedCollector::new(email)),
        Box::new(SemanticScholarCollector::new()),
      ],
      HarvestOptions::default(),
    )
  }

  /// Replaces the harvester's options.
  pub fn with_options(mut self, options: HarvestOptions) -> Self {
    self.options = options;
    self
  }

  /// Collects papers for the seed authors, optionally expanding through
  /// their co-author network.
  ///
  /// Rejects an empty seed list up front. The expansion loop terminates
  /// when the round budget is exhausted or no unvisited candidate
  /// co-authors remain.
  pub async fn collect_authors(
    &self,
    db: &mut Database,
    seeds: &[String],
    expand: bool,
  ) -> Result<HarvestReport> {
    if seeds.is_empty() {
      return Err(CollabnetError::EmptySeed("author"));
    }

    debug!(seeds = seeds.len(), expand, "starting collection run");

    let mut report = HarvestReport::default();
    let mut visited: HashSet<String> = HashSet::new();

    self
      .collect_round(db, seeds, self.options.max_papers_per_author, &mut visited, &mut report)
      .await?;

    if expand {
      for round in 0..self.options.expansion_rounds {
        let candidates = self.expansion_candidates(db, &visited).await?;
        if candidates.is_empty() {
          debug!(round, "no unvisited co-authors remain; stopping expansion");
          break;
        }

        debug!(round, candidates = candidates.len(), "expanding author network");
        self
          .collect_round(
            db,
            &candidates,
            self.options.expansion_paper_cap,
            &mut visited,
            &mut report,
          )
          .await?;
        report.rounds_completed += 1;
      }
    }

    debug!(
      stored = report.papers_stored,
      merged = report.papers_merged,
      failed = report.papers_failed,
      "collection run complete"
    );
    Ok(report)
  }

  /// Collects papers matching the given keywords from every source.
  ///
  /// One query per source, no expansion. Rejects an empty keyword list.
  pub async fn collect_keywords(
    &self,
    db: &mut Database,
    keywords: &[String],
    max_papers: usize,
  ) -> Result<HarvestReport> {
    if keywords.is_empty() {
      return Err(CollabnetError::EmptySeed("keyword"));
    }

    let mut report = HarvestReport::default();
    for collector in &self.collectors {
      let papers = match collector.search_by_keywords(keywords, max_papers).await {
        Ok(papers) => papers,
        Err(error) => {
          warn!(
            source = %collector.source(),
            ?keywords,
            %error,
            "keyword search failed; continuing with remaining sources"
          );
          vec![]
        },
      };
      self.store_papers(db, papers, &mut report).await;
    }
    Ok(report)
  }

  /// Fetches and stores one round's authors in sequence.
  ///
  /// Every author is queried through every collector; each author is
  /// marked visited once fetched, and the courtesy delay separates
  /// consecutive authors.
  async fn collect_round(
    &self,
    db: &mut Database,
    authors: &[String],
    max_papers: usize,
    visited: &mut HashSet<String>,
    report: &mut HarvestReport,
  ) -> Result<()> {
    let mut first = true;
    for author in authors {
      if visited.contains(author) {
        debug!(author = %author, "already collected; skipping");
        continue;
      }
      if !first {
        sleep(self.options.author_delay).await;
      }
      first = false;

      for collector in &self.collectors {
        let papers = match collector.search_by_author(author, max_papers).await {
          Ok(papers) => papers,
          Err(error) => {
            warn!(
              source = %collector.source(),
              author = %author,
              %error,
              "author search failed; continuing with remaining sources"
            );
            vec![]
          },
        };
        self.store_papers(db, papers, report).await;
      }

      visited.insert(author.clone());
      report.authors_visited += 1;
    }
    Ok(())
  }

  /// Stores a batch of candidates, tolerating per-paper failures.
  async fn store_papers(&self, db: &mut Database, papers: Vec<Paper>, report: &mut HarvestReport) {
    for paper in papers {
      report.papers_seen += 1;
      match Save::paper(&paper).execute(db).await {
        Ok((_, true)) => report.papers_stored += 1,
        Ok((_, false)) => report.papers_merged += 1,
        Err(error) => {
          warn!(
            paper = %paper.unique_id(),
            %error,
            "failed to store paper; skipping"
          );
          report.papers_failed += 1;
        },
      }
    }
  }

  /// Computes the next round's candidate authors.
  ///
  /// Candidates are the most collaboration-frequent authors in the stored
  /// graph that have not been visited yet, truncated to the per-round
  /// fetch cap. Ordering among equal frequencies follows the store's
  /// first-insertion order.
  async fn expansion_candidates(
    &self,
    db: &mut Database,
    visited: &HashSet<String>,
  ) -> Result<Vec<String>> {
    let ranked = AuthorFrequency::top(self.options.frequency_pool).execute(db).await?;

    let mut candidates: Vec<String> = ranked
      .into_iter()
      .map(|(name, _)| name)
      .filter(|name| !visited.contains(name))
      .collect();
    candidates.truncate(self.options.expansion_author_cap);
    Ok(candidates)
  }
}
