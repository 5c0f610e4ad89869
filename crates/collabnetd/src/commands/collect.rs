//! Module for running collection through the configured sources.

use collabnet::{
  graph::CollaborationGraph,
  harvest::{HarvestOptions, HarvestReport, Harvester},
};

use super::*;

/// Options for the [`Commands::Collect`] subcommand.
#[derive(Args, Clone)]
pub struct CollectOptions {
  /// Operator email sent to sources that require a contact address
  #[arg(long)]
  pub email: Option<String>,

  /// Seed author names to collect papers for
  #[arg(long, num_args = 1..)]
  pub authors: Vec<String>,

  /// Keywords to collect papers for
  #[arg(long, num_args = 1..)]
  pub keywords: Vec<String>,

  /// Expand the collection through co-authors of collected papers
  #[arg(long)]
  pub expand: bool,

  /// Maximum papers fetched per seed author or keyword query
  #[arg(long)]
  pub max_papers: Option<usize>,

  /// Print network analysis once collection completes
  #[arg(long)]
  pub analysis: bool,
}

/// Function for the [`Commands::Collect`] in the CLI.
pub async fn collect(cli: &Cli, collect_options: CollectOptions) -> Result<()> {
  let CollectOptions { email, authors, keywords, expand, max_papers, analysis } = collect_options;

  if authors.is_empty() && keywords.is_empty() {
    eprintln!(
      "{} Nothing to collect: provide --authors and/or --keywords.",
      style(ERROR_PREFIX).red()
    );
    return Err(CollabnetdError::Input(
      "provide at least one author or keyword to collect".to_string(),
    ));
  }

  let config = load_config();
  let Some(email) = email.or_else(|| config.email.clone()) else {
    eprintln!(
      "{} An operator email is required: pass --email or set it in {}.",
      style(ERROR_PREFIX).red(),
      Config::default_path().display()
    );
    return Err(CollabnetdError::Input("operator email is required".to_string()));
  };

  let max_papers = max_papers.unwrap_or(config.max_papers_per_author);
  let options = HarvestOptions {
    max_papers_per_author: max_papers,
    expansion_rounds: config.expansion_rounds,
    ..HarvestOptions::default()
  };

  let mut db = open_database(cli, &config).await?;
  let harvester = Harvester::with_default_sources(&email).with_options(options);

  if !authors.is_empty() {
    println!(
      "{} Collecting papers for {} author(s){}...",
      style(INFO_PREFIX).blue(),
      authors.len(),
      if expand { " with network expansion" } else { "" }
    );
    let report = harvester.collect_authors(&mut db, &authors, expand).await?;
    print_report(&report);
  }

  if !keywords.is_empty() {
    println!(
      "{} Collecting papers for keywords: {}...",
      style(INFO_PREFIX).blue(),
      keywords.join(", ")
    );
    let report = harvester.collect_keywords(&mut db, &keywords, max_papers).await?;
    print_report(&report);
  }

  if analysis {
    let graph = CollaborationGraph::load(&mut db).await?;
    print_summary(&collabnet::analysis::summarize(&graph));
  }

  Ok(())
}

/// Prints one run's aggregate counters.
fn print_report(report: &HarvestReport) {
  println!(
    "{} Collection complete: {} new, {} merged, {} failed ({} author(s) visited, {} expansion \
     round(s))",
    style(SUCCESS_PREFIX).green(),
    report.papers_stored,
    report.papers_merged,
    report.papers_failed,
    report.authors_visited,
    report.rounds_completed,
  );
}
