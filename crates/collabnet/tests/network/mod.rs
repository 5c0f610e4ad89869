use collabnet::{
  analysis,
  database::{DatabaseInstruction, Save},
  graph::CollaborationGraph,
};

use crate::{date, paper_with_authors, setup_test_db, traced_test, TestResult};

/// Rebuilding the graph view from stored rows
mod graph_building {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_empty_store_yields_empty_graph() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;

    let graph = CollaborationGraph::load(&mut db).await?;
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);

    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_graph_replays_collaborations() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;

    let first = paper_with_authors(
      "First",
      Some("2301.00001"),
      date(2023, 1, 1),
      &["A. Smith", "B. Jones"],
    );
    let second = paper_with_authors(
      "Second",
      Some("2301.00002"),
      date(2023, 2, 1),
      &["A. Smith", "B. Jones", "C. Lee"],
    );
    Save::paper(&first).execute(&mut db).await?;
    Save::paper(&second).execute(&mut db).await?;

    let graph = CollaborationGraph::load(&mut db).await?;
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.degree("A. Smith"), Some(2));

    // Edge weight is the pair's shared-paper count.
    let edges = graph.edges();
    let smith_jones = edges
      .iter()
      .find(|(a, b, _)| (*a, *b) == ("A. Smith", "B. Jones") || (*a, *b) == ("B. Jones", "A. Smith"))
      .expect("edge must exist");
    assert_eq!(smith_jones.2, 2);

    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_disconnected_groups_form_components() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;

    let crypto = paper_with_authors(
      "Crypto",
      Some("2301.00003"),
      date(2023, 1, 1),
      &["A. Smith", "B. Jones"],
    );
    let biology =
      paper_with_authors("Biology", Some("2301.00004"), date(2023, 1, 2), &["D. Woods", "E. Park"]);
    Save::paper(&crypto).execute(&mut db).await?;
    Save::paper(&biology).execute(&mut db).await?;

    let graph = CollaborationGraph::load(&mut db).await?;
    let components = graph.connected_components();
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].len(), 2);
    assert_eq!(components[1].len(), 2);

    Ok(())
  }
}

/// Summary statistics over stored data
mod summaries {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_empty_store_summary_is_all_zeros() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;

    let graph = CollaborationGraph::load(&mut db).await?;
    let summary = analysis::summarize(&graph);

    assert_eq!(summary.author_count, 0);
    assert_eq!(summary.collaboration_count, 0);
    assert_eq!(summary.average_degree, 0.0);
    assert_eq!(summary.density, 0.0);
    assert_eq!(summary.average_clustering, 0.0);
    assert_eq!(summary.connected_components, 0);
    assert_eq!(summary.largest_component_size, 0);
    assert!(summary.most_collaborative.is_empty());

    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_summary_over_stored_triangle() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;

    let paper = paper_with_authors(
      "Triangle",
      Some("2301.00005"),
      date(2023, 5, 1),
      &["A. Smith", "B. Jones", "C. Lee"],
    );
    Save::paper(&paper).execute(&mut db).await?;

    let graph = CollaborationGraph::load(&mut db).await?;
    let summary = analysis::summarize(&graph);

    assert_eq!(summary.author_count, 3);
    assert_eq!(summary.collaboration_count, 3);
    assert_eq!(summary.average_degree, 2.0);
    assert_eq!(summary.density, 1.0);
    assert_eq!(summary.average_clustering, 1.0);
    assert_eq!(summary.connected_components, 1);
    assert_eq!(summary.largest_component_size, 3);
    assert_eq!(summary.most_collaborative.len(), 3);
    assert!(summary.most_collaborative.iter().all(|(_, degree)| *degree == 2));

    Ok(())
  }
}
