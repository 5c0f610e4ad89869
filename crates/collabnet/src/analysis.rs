//! Network summary statistics over a collaboration graph snapshot.
//!
//! [`summarize`] is a pure function of the graph: it never touches the
//! store, so callers decide how fresh a snapshot to analyze. All ratio
//! metrics report 0 on an empty graph instead of dividing by zero.

use super::*;
use crate::graph::CollaborationGraph;

/// Number of top authors reported by degree.
const TOP_AUTHORS: usize = 10;

/// Summary statistics of a collaboration network.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkSummary {
  /// Total authors in the graph
  pub author_count:           usize,
  /// Total collaboration edges
  pub collaboration_count:    usize,
  /// Mean collaboration degree across authors
  pub average_degree:         f64,
  /// Top authors by degree, descending; ties keep insertion order
  pub most_collaborative:     Vec<(String, usize)>,
  /// Number of connected components
  pub connected_components:   usize,
  /// Size of the largest connected component
  pub largest_component_size: usize,
  /// Fraction of possible edges that exist
  pub density:                f64,
  /// Mean local clustering coefficient across authors
  pub average_clustering:     f64,
}

/// Computes summary statistics for the given graph snapshot.
///
/// # Examples
///
/// ```
/// use collabnet::{analysis, graph::CollaborationGraph};
///
/// let mut graph = CollaborationGraph::new();
/// graph.add_edge("A. Smith", "B. Jones", 1);
///
/// let summary = analysis::summarize(&graph);
/// assert_eq!(summary.author_count, 2);
/// assert_eq!(summary.connected_components, 1);
/// ```
pub fn summarize(graph: &CollaborationGraph) -> NetworkSummary {
  let node_count = graph.node_count();
  let edge_count = graph.edge_count();

  if node_count == 0 {
    return NetworkSummary {
      author_count:           0,
      collaboration_count:    0,
      average_degree:         0.0,
      most_collaborative:     vec![],
      connected_components:   0,
      largest_component_size: 0,
      density:                0.0,
      average_clustering:     0.0,
    };
  }

  let degrees = graph.degrees();
  let average_degree = degrees.iter().map(|&(_, d)| d).sum::<usize>() as f64 / node_count as f64;

  let mut most_collaborative: Vec<(String, usize)> =
    degrees.iter().map(|&(name, degree)| (name.to_string(), degree)).collect();
  // Stable sort keeps insertion order among equal degrees.
  most_collaborative.sort_by(|a, b| b.1.cmp(&a.1));
  most_collaborative.truncate(TOP_AUTHORS);

  let components = graph.connected_components();
  let largest_component_size = components.iter().map(Vec::len).max().unwrap_or(0);

  let density = if node_count > 1 {
    2.0 * edge_count as f64 / (node_count as f64 * (node_count - 1) as f64)
  } else {
    0.0
  };

  let average_clustering =
    (0..node_count).map(|idx| graph.clustering_at(idx)).sum::<f64>() / node_count as f64;

  NetworkSummary {
    author_count: node_count,
    collaboration_count: edge_count,
    average_degree,
    most_collaborative,
    connected_components: components.len(),
    largest_component_size,
    density,
    average_clustering,
  }
}
