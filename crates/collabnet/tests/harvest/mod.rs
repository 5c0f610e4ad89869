use std::{
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  },
  time::Duration,
};

use async_trait::async_trait;
use collabnet::{
  collector::Collector,
  database::{Collaborations, DatabaseInstruction, Query},
  error::{CollabnetError, Result},
  harvest::{HarvestOptions, Harvester},
  paper::{Paper, PaperSource},
};

use crate::{date, paper_with_authors, setup_test_db, traced_test, TestResult};

/// Collector double returning a fixed paper set for every query.
struct StubCollector {
  source: PaperSource,
  papers: Vec<Paper>,
  calls:  Arc<AtomicUsize>,
}

impl StubCollector {
  fn new(source: PaperSource, papers: Vec<Paper>) -> (Self, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    (Self { source, papers, calls: calls.clone() }, calls)
  }
}

#[async_trait]
impl Collector for StubCollector {
  fn source(&self) -> PaperSource { self.source }

  async fn search_by_author(&self, _name: &str, _max_results: usize) -> Result<Vec<Paper>> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Ok(self.papers.clone())
  }

  async fn search_by_keywords(
    &self,
    _keywords: &[String],
    _max_results: usize,
  ) -> Result<Vec<Paper>> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Ok(self.papers.clone())
  }
}

/// Collector double whose every call fails with a transport-style error.
struct FailingCollector;

#[async_trait]
impl Collector for FailingCollector {
  fn source(&self) -> PaperSource { PaperSource::SemanticScholar }

  async fn search_by_author(&self, _name: &str, _max_results: usize) -> Result<Vec<Paper>> {
    Err(CollabnetError::Api("injected transport failure".into()))
  }

  async fn search_by_keywords(
    &self,
    _keywords: &[String],
    _max_results: usize,
  ) -> Result<Vec<Paper>> {
    Err(CollabnetError::Api("injected transport failure".into()))
  }
}

/// Options with the courtesy delay removed so tests run instantly.
fn fast_options() -> HarvestOptions {
  HarvestOptions { author_delay: Duration::ZERO, ..HarvestOptions::default() }
}

fn shared_paper() -> Paper {
  paper_with_authors(
    "A Shared Result",
    Some("2301.07041"),
    date(2023, 1, 17),
    &["A. Smith", "B. Jones", "C. Lee"],
  )
}

fn seeds() -> Vec<String> { vec!["A. Smith".to_string(), "B. Jones".to_string()] }

/// Seed-round behavior
mod seed_rounds {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_shared_paper_builds_three_collaborations() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;
    let (stub, _) = StubCollector::new(PaperSource::Arxiv, vec![shared_paper()]);
    let harvester = Harvester::new(vec![Box::new(stub)], fast_options());

    let report = harvester.collect_authors(&mut db, &seeds(), false).await?;

    // Both seed authors return the same paper; one store, one merge.
    assert_eq!(report.papers_seen, 2);
    assert_eq!(report.papers_stored, 1);
    assert_eq!(report.papers_merged, 1);
    assert_eq!(report.papers_failed, 0);
    assert_eq!(report.authors_visited, 2);

    let papers = Query::list_all().execute(&mut db).await?;
    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].paper.authors.len(), 3);

    let rows = Collaborations::all().execute(&mut db).await?;
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| row.paper_count == 1));

    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_rerun_does_not_double_count() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;

    for _ in 0..2 {
      let (stub, _) = StubCollector::new(PaperSource::Arxiv, vec![shared_paper()]);
      let harvester = Harvester::new(vec![Box::new(stub)], fast_options());
      harvester.collect_authors(&mut db, &seeds(), false).await?;
    }

    let papers = Query::list_all().execute(&mut db).await?;
    assert_eq!(papers.len(), 1);

    let rows = Collaborations::all().execute(&mut db).await?;
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| row.paper_count == 1));

    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_empty_seed_list_is_rejected() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;
    let (stub, calls) = StubCollector::new(PaperSource::Arxiv, vec![shared_paper()]);
    let harvester = Harvester::new(vec![Box::new(stub)], fast_options());

    let result = harvester.collect_authors(&mut db, &[], true).await;
    assert!(matches!(result, Err(CollabnetError::EmptySeed("author"))));

    let result = harvester.collect_keywords(&mut db, &[], 10).await;
    assert!(matches!(result, Err(CollabnetError::EmptySeed("keyword"))));

    // Validation happens before any collector is consulted.
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    Ok(())
  }
}

/// Failure isolation between sources
mod failure_isolation {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_one_failing_source_leaves_others_intact() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;

    let arxiv_paper =
      paper_with_authors("From arXiv", Some("2301.00001"), date(2023, 1, 1), &["A. Smith"]);
    let mut pubmed_paper =
      paper_with_authors("From PubMed", None, date(2023, 2, 1), &["A. Smith"]);
    pubmed_paper.pubmed_id = Some("555001".into());
    pubmed_paper.source = PaperSource::Pubmed;

    let (arxiv, _) = StubCollector::new(PaperSource::Arxiv, vec![arxiv_paper]);
    let (pubmed, _) = StubCollector::new(PaperSource::Pubmed, vec![pubmed_paper]);
    let harvester = Harvester::new(
      vec![Box::new(arxiv), Box::new(FailingCollector), Box::new(pubmed)],
      fast_options(),
    );

    let report =
      harvester.collect_authors(&mut db, &["A. Smith".to_string()], false).await?;

    // The failed source yields nothing; it is not a per-paper failure.
    assert_eq!(report.papers_seen, 2);
    assert_eq!(report.papers_stored, 2);
    assert_eq!(report.papers_failed, 0);

    let papers = Query::list_all().execute(&mut db).await?;
    assert_eq!(papers.len(), 2);

    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_all_sources_failing_still_completes() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;
    let harvester = Harvester::new(vec![Box::new(FailingCollector)], fast_options());

    let report = harvester.collect_authors(&mut db, &seeds(), false).await?;
    assert_eq!(report.papers_seen, 0);
    assert_eq!(report.authors_visited, 2);

    Ok(())
  }
}

/// Expansion-round behavior
mod expansion {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_round_limit_zero_collects_seeds_only() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;
    let (stub, calls) = StubCollector::new(PaperSource::Arxiv, vec![shared_paper()]);
    let options = HarvestOptions { expansion_rounds: 0, ..fast_options() };
    let harvester = Harvester::new(vec![Box::new(stub)], options);

    let report = harvester.collect_authors(&mut db, &seeds(), true).await?;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(report.rounds_completed, 0);
    assert_eq!(report.authors_visited, 2);

    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_expansion_visits_unseen_coauthors_then_stops() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;
    let (stub, calls) = StubCollector::new(PaperSource::Arxiv, vec![shared_paper()]);
    let harvester = Harvester::new(vec![Box::new(stub)], fast_options());

    let report = harvester.collect_authors(&mut db, &seeds(), true).await?;

    // Seed round fetches the two seeds; the first expansion round picks up
    // C. Lee (the only unvisited co-author) and the second finds nobody
    // left, terminating early.
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(report.rounds_completed, 1);
    assert_eq!(report.authors_visited, 3);

    let papers = Query::list_all().execute(&mut db).await?;
    assert_eq!(papers.len(), 1);

    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_expansion_respects_author_cap() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;

    // One seed whose paper has many co-authors, with the per-round fetch
    // cap forced down to two.
    let big_paper = paper_with_authors(
      "Big Collaboration",
      Some("2301.00020"),
      date(2023, 4, 1),
      &["Seed", "C1", "C2", "C3", "C4", "C5"],
    );
    let (stub, calls) = StubCollector::new(PaperSource::Arxiv, vec![big_paper]);
    let options =
      HarvestOptions { expansion_rounds: 1, expansion_author_cap: 2, ..fast_options() };
    let harvester = Harvester::new(vec![Box::new(stub)], options);

    let report = harvester.collect_authors(&mut db, &["Seed".to_string()], true).await?;

    // One seed fetch plus exactly two capped expansion fetches.
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(report.authors_visited, 3);

    Ok(())
  }
}

/// Keyword collection
mod keywords {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_keyword_collection_stores_results() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;
    let (stub, calls) = StubCollector::new(PaperSource::Arxiv, vec![shared_paper()]);
    let harvester = Harvester::new(vec![Box::new(stub), Box::new(FailingCollector)], fast_options());

    let report = harvester
      .collect_keywords(&mut db, &["homomorphic encryption".to_string()], 10)
      .await?;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.papers_stored, 1);
    assert_eq!(report.papers_failed, 0);

    let papers = Query::list_all().execute(&mut db).await?;
    assert_eq!(papers.len(), 1);

    Ok(())
  }
}
