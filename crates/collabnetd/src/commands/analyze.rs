//! Module for printing collaboration network statistics.

use collabnet::{
  analysis::{self, NetworkSummary},
  graph::CollaborationGraph,
};

use super::*;

/// Function for the [`Commands::Analyze`] in the CLI.
pub async fn analyze(cli: &Cli) -> Result<()> {
  let config = load_config();
  let mut db = open_database(cli, &config).await?;

  let graph = CollaborationGraph::load(&mut db).await?;
  print_summary(&analysis::summarize(&graph));
  Ok(())
}

/// Prints a network summary as an indented tree.
pub fn print_summary(summary: &NetworkSummary) {
  println!("{} Network analysis", style(INFO_PREFIX).blue());
  println!("{TREE_BRANCH} authors: {}", summary.author_count);
  println!("{TREE_BRANCH} collaborations: {}", summary.collaboration_count);
  println!("{TREE_BRANCH} average degree: {:.2}", summary.average_degree);
  println!("{TREE_BRANCH} density: {:.4}", summary.density);
  println!(
    "{TREE_BRANCH} connected components: {} (largest: {})",
    summary.connected_components, summary.largest_component_size
  );
  println!("{TREE_BRANCH} average clustering: {:.4}", summary.average_clustering);
  println!("{TREE_LEAF} most collaborative:");
  for (rank, (name, degree)) in summary.most_collaborative.iter().enumerate() {
    println!("   {}. {} ({} co-author(s))", rank + 1, style(name).bold(), degree);
  }
}
