//! Collector implementation for the Semantic Scholar Graph API.
//!
//! Author search is a two-step round trip: `/author/search` resolves the
//! name to an author id, then `/author/{id}/papers` pages that author's
//! papers with an explicit `fields` list. Keyword search has no native
//! filter on this API, so it is approximated with a free-text
//! `/paper/search` over titles and abstracts; callers accept that
//! approximation.
//!
//! Semantic Scholar reports citation counts and external identifiers
//! (arXiv, PubMed, DOI), which makes it the richest of the supported
//! sources for deduplication.

use super::*;

/// Semantic Scholar rate limit: one hundred calls per five minutes.
const S2_CALLS: usize = 100;
/// Window backing the Semantic Scholar rate limit.
const S2_PERIOD: Duration = Duration::from_secs(300);

/// Graph API base URL.
const S2_BASE_URL: &str = "https://api.semanticscholar.org/graph/v1";

/// Field list requested for every paper payload.
const S2_PAPER_FIELDS: &str = "title,authors,abstract,year,citationCount,journal,externalIds";

/// Response envelope for `/author/search`.
#[derive(Debug, Deserialize)]
struct AuthorSearchResponse {
  /// Matched authors, best match first
  #[serde(default)]
  data: Vec<AuthorHit>,
}

/// One author match from `/author/search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorHit {
  /// Unique Semantic Scholar author id
  author_id: String,
}

/// Response envelope for paper listings.
#[derive(Debug, Deserialize)]
struct PapersResponse {
  /// Papers in the requested page
  #[serde(default)]
  data: Vec<PaperData>,
}

/// One paper payload from the Graph API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaperData {
  /// Paper title
  #[serde(default)]
  title:          Option<String>,
  /// Abstract text, absent for many records
  #[serde(default, rename = "abstract")]
  abstract_text:  Option<String>,
  /// Publication year; the API rarely reports full dates
  #[serde(default)]
  year:           Option<i32>,
  /// Citation count at query time
  #[serde(default)]
  citation_count: Option<i64>,
  /// Journal metadata when known
  #[serde(default)]
  journal:        Option<JournalData>,
  /// External identifiers keyed by registry
  #[serde(default)]
  external_ids:   Option<ExternalIds>,
  /// Author list in citation order
  #[serde(default)]
  authors:        Vec<AuthorRef>,
}

/// Journal metadata nested inside a paper payload.
#[derive(Debug, Deserialize)]
struct JournalData {
  /// Journal name
  #[serde(default)]
  name: Option<String>,
}

/// External identifier map nested inside a paper payload.
#[derive(Debug, Deserialize)]
struct ExternalIds {
  /// arXiv identifier
  #[serde(default, rename = "ArXiv")]
  arxiv:  Option<String>,
  /// PubMed identifier
  #[serde(default, rename = "PubMed")]
  pubmed: Option<String>,
  /// DOI reference
  #[serde(default, rename = "DOI")]
  doi:    Option<String>,
}

/// Minimal author reference inside a paper's author list.
#[derive(Debug, Deserialize)]
struct AuthorRef {
  /// Author name; occasionally absent upstream
  #[serde(default)]
  name: Option<String>,
}

/// Collector for Semantic Scholar papers with citation data.
///
/// # Examples
///
/// ```no_run
/// # use collabnet::collector::{Collector, SemanticScholarCollector};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let s2 = SemanticScholarCollector::new();
/// let papers = s2.search_by_author("A. Smith", 50).await?;
/// # Ok(())
/// # }
/// ```
pub struct SemanticScholarCollector {
  /// Web client reused across requests to the API
  client:  reqwest::Client,
  /// Limiter enforcing the unauthenticated Graph API quota
  limiter: RateLimit,
}

impl SemanticScholarCollector {
  /// Creates a new Semantic Scholar collector with its rate limiter.
  pub fn new() -> Self {
    Self { client: http_client(), limiter: RateLimit::new(S2_CALLS, S2_PERIOD) }
  }

  /// Resolves an author name to the best-matching author id, if any.
  async fn find_author_id(&self, name: &str) -> Result<Option<String>> {
    self.limiter.acquire().await;

    let response = self
      .client
      .get(format!("{S2_BASE_URL}/author/search"))
      .query(&[("query", name), ("limit", "1")])
      .send()
      .await?;

    if !response.status().is_success() {
      return Err(CollabnetError::Api(format!(
        "Semantic Scholar author search returned status {}",
        response.status()
      )));
    }

    let matches: AuthorSearchResponse = response.json().await?;
    Ok(matches.data.into_iter().next().map(|hit| hit.author_id))
  }

  /// Fetches one page of papers from the given endpoint.
  async fn fetch_papers(&self, url: String, max_results: usize) -> Result<Vec<Paper>> {
    self.limiter.acquire().await;

    let response = self
      .client
      .get(url)
      .query(&[("fields", S2_PAPER_FIELDS), ("limit", &max_results.to_string())])
      .send()
      .await?;

    if !response.status().is_success() {
      return Err(CollabnetError::Api(format!(
        "Semantic Scholar returned status {}",
        response.status()
      )));
    }

    let papers: PapersResponse = response.json().await?;
    Ok(papers.data.iter().map(paper_data_to_paper).collect())
  }
}

impl Default for SemanticScholarCollector {
  fn default() -> Self { Self::new() }
}

#[async_trait]
impl Collector for SemanticScholarCollector {
  fn source(&self) -> PaperSource { PaperSource::SemanticScholar }

  async fn search_by_author(&self, name: &str, max_results: usize) -> Result<Vec<Paper>> {
    let Some(author_id) = self.find_author_id(name).await? else {
      debug!(author = name, "no Semantic Scholar author match");
      return Ok(vec![]);
    };

    let papers =
      self.fetch_papers(format!("{S2_BASE_URL}/author/{author_id}/papers"), max_results).await?;
    debug!(author = name, count = papers.len(), "Semantic Scholar author search complete");
    Ok(papers)
  }

  /// Keyword search approximated by free-text relevance search.
  ///
  /// The Graph API has no keyword filter, so the keywords are joined into
  /// one query matched against titles and abstracts.
  async fn search_by_keywords(
    &self,
    keywords: &[String],
    max_results: usize,
  ) -> Result<Vec<Paper>> {
    self.limiter.acquire().await;

    let query = keywords.join(" ");
    let response = self
      .client
      .get(format!("{S2_BASE_URL}/paper/search"))
      .query(&[
        ("query", query.as_str()),
        ("limit", &max_results.to_string()),
        ("fields", S2_PAPER_FIELDS),
      ])
      .send()
      .await?;

    if !response.status().is_success() {
      return Err(CollabnetError::Api(format!(
        "Semantic Scholar returned status {}",
        response.status()
      )));
    }

    let papers: PapersResponse = response.json().await?;
    debug!(?keywords, count = papers.data.len(), "Semantic Scholar keyword search complete");
    Ok(papers.data.iter().map(paper_data_to_paper).collect())
  }
}

/// Normalizes one Graph API paper payload into the canonical shape.
fn paper_data_to_paper(data: &PaperData) -> Paper {
  let date_input = data.year.map(|y| y.to_string()).unwrap_or_default();

  Paper {
    title:            normalize::clean_text(data.title.as_deref().unwrap_or_default()),
    authors:          data
      .authors
      .iter()
      .filter_map(|a| a.name.as_deref())
      .map(Author::named)
      .collect(),
    abstract_text:    normalize::clean_text(data.abstract_text.as_deref().unwrap_or_default()),
    publication_date: normalize::parse_publication_date(&date_input),
    arxiv_id:         data.external_ids.as_ref().and_then(|ids| ids.arxiv.clone()),
    pubmed_id:        data.external_ids.as_ref().and_then(|ids| ids.pubmed.clone()),
    doi:              data.external_ids.as_ref().and_then(|ids| ids.doi.clone()),
    journal:          data.journal.as_ref().and_then(|j| j.name.clone()),
    citation_count:   data.citation_count.unwrap_or(0),
    keywords:         vec![],
    institutions:     vec![],
    source:           PaperSource::SemanticScholar,
  }
}
