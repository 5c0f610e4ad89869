//! Collector implementation for PubMed E-utilities.
//!
//! PubMed collection is currently soft-disabled: the upstream integration
//! is under maintenance, so every search logs a warning and reports zero
//! results. This is a deliberate state, not an error, and it keeps the
//! pipeline's shape intact (the harvester still fans out over three
//! sources and merges whatever each returns).
//!
//! The operator email required by E-utilities etiquette and the 3-calls
//! per second limiter are kept in place so the collector can be re-enabled
//! without touching its callers.

use super::*;

/// PubMed rate limit: three calls per second without an API key.
const PUBMED_CALLS: usize = 3;
/// Window backing the PubMed rate limit.
const PUBMED_PERIOD: Duration = Duration::from_secs(1);

/// Collector for PubMed papers (disabled during maintenance).
pub struct PubmedCollector {
  /// Operator contact email sent with E-utilities requests
  email:       String,
  /// Limiter enforcing the E-utilities courtesy limit
  limiter:     RateLimit,
  /// Soft-disable flag; cleared when the integration is restored
  maintenance: bool,
}

impl PubmedCollector {
  /// Creates a new PubMed collector for the given operator email.
  pub fn new(email: impl Into<String>) -> Self {
    Self {
      email:       email.into(),
      limiter:     RateLimit::new(PUBMED_CALLS, PUBMED_PERIOD),
      maintenance: true,
    }
  }

  /// The operator email this collector identifies itself with.
  pub fn email(&self) -> &str { &self.email }

  /// Logs the maintenance skip once the rate limiter has been honored.
  async fn skip(&self, operation: &str, target: &str) -> Vec<Paper> {
    self.limiter.acquire().await;
    warn!(
      operation,
      target,
      email = %self.email,
      "PubMed is under maintenance; skipping collection"
    );
    vec![]
  }
}

#[async_trait]
impl Collector for PubmedCollector {
  fn source(&self) -> PaperSource { PaperSource::Pubmed }

  async fn search_by_author(&self, name: &str, _max_results: usize) -> Result<Vec<Paper>> {
    if self.maintenance {
      return Ok(self.skip("search_by_author", name).await);
    }
    // TODO (autoparallel): restore the esearch/efetch round trip once the
    // upstream maintenance window closes.
    Ok(vec![])
  }

  async fn search_by_keywords(
    &self,
    keywords: &[String],
    _max_results: usize,
  ) -> Result<Vec<Paper>> {
    if self.maintenance {
      return Ok(self.skip("search_by_keywords", &keywords.join(", ")).await);
    }
    Ok(vec![])
  }
}
