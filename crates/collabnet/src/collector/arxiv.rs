//! Collector implementation for the arXiv query API.
//!
//! Queries the Atom feed endpoint (`http://export.arxiv.org/api/query`)
//! with `au:"<name>"` author searches and quoted, AND-joined keyword
//! searches, both sorted by submission date descending. Responses are
//! parsed from XML and normalized into [`Paper`] values; subject categories
//! become the paper's keywords.
//!
//! arXiv's usage policy asks for at most one request every three seconds,
//! which the collector enforces through its own [`RateLimit`].

use quick_xml::de::from_str;

use super::*;

/// arXiv rate limit: one call per three seconds.
const ARXIV_CALLS: usize = 1;
/// Window backing the arXiv rate limit.
const ARXIV_PERIOD: Duration = Duration::from_secs(3);

lazy_static::lazy_static! {
  /// Extracts the bare identifier from an entry URL such as
  /// `http://arxiv.org/abs/2301.07041v2`, dropping the version suffix so
  /// revised papers dedup onto the same record.
  static ref ABS_ID: regex::Regex =
    regex::Regex::new(r"/abs/(.+?)(?:v\d+)?$").expect("abs id pattern is valid");
}

/// Internal representation of the arXiv API's Atom feed response.
#[derive(Debug, Deserialize)]
struct Feed {
  /// A `Feed` may contain multiple `Entry`s, one per matched paper
  #[serde(rename = "entry", default)]
  entries: Vec<Entry>,
}

/// Internal representation of a paper entry from arXiv's API response.
#[derive(Debug, Deserialize)]
struct Entry {
  /// arXiv URL (e.g., "http://arxiv.org/abs/2301.07041v1")
  id:          String,
  /// Paper title (may contain LaTeX markup and wrapped whitespace)
  title:       String,
  /// Paper abstract
  summary:     String,
  /// Publication timestamp in RFC 3339 form
  published:   String,
  /// List of paper authors in citation order
  #[serde(rename = "author", default)]
  authors:     Vec<EntryAuthor>,
  /// Subject categories attached to the paper
  #[serde(rename = "category", default)]
  categories:  Vec<Category>,
  /// DOI when the authors registered one
  #[serde(rename = "arxiv:doi", default)]
  doi:         Option<String>,
  /// Journal reference when the paper was published elsewhere
  #[serde(rename = "arxiv:journal_ref", default)]
  journal_ref: Option<String>,
}

/// Internal representation of an author from arXiv's API response.
#[derive(Debug, Deserialize)]
struct EntryAuthor {
  /// Author's full name
  name: String,
}

/// A subject category element; the tag lives in the `term` attribute.
#[derive(Debug, Deserialize)]
struct Category {
  /// Category tag such as "cs.CL"
  #[serde(rename = "@term")]
  term: String,
}

/// Collector for arXiv papers.
///
/// # Examples
///
/// ```no_run
/// # use collabnet::collector::{ArxivCollector, Collector};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let arxiv = ArxivCollector::new();
/// let papers = arxiv.search_by_author("A. Smith", 50).await?;
/// # Ok(())
/// # }
/// ```
pub struct ArxivCollector {
  /// Web client reused across requests to the API
  client:  reqwest::Client,
  /// Limiter enforcing arXiv's one-call-per-three-seconds policy
  limiter: RateLimit,
}

impl ArxivCollector {
  /// Creates a new arXiv collector with its rate limiter.
  pub fn new() -> Self {
    Self { client: http_client(), limiter: RateLimit::new(ARXIV_CALLS, ARXIV_PERIOD) }
  }

  /// Runs one feed query and normalizes every returned entry.
  async fn query(&self, search_query: &str, max_results: usize) -> Result<Vec<Paper>> {
    self.limiter.acquire().await;

    debug!(search_query, max_results, "querying arXiv");

    let response = self
      .client
      .get("http://export.arxiv.org/api/query")
      .query(&[
        ("search_query", search_query),
        ("start", "0"),
        ("max_results", &max_results.to_string()),
        ("sortBy", "submittedDate"),
        ("sortOrder", "descending"),
      ])
      .send()
      .await?;

    if !response.status().is_success() {
      return Err(CollabnetError::Api(format!("arXiv returned status {}", response.status())));
    }

    let body = response.text().await?;
    let feed: Feed = from_str(&body)
      .map_err(|e| CollabnetError::Api(format!("failed to parse arXiv feed: {e}")))?;

    Ok(feed.entries.iter().map(entry_to_paper).collect())
  }
}

impl Default for ArxivCollector {
  fn default() -> Self { Self::new() }
}

#[async_trait]
impl Collector for ArxivCollector {
  fn source(&self) -> PaperSource { PaperSource::Arxiv }

  async fn search_by_author(&self, name: &str, max_results: usize) -> Result<Vec<Paper>> {
    let papers = self.query(&format!("au:\"{name}\""), max_results).await?;
    debug!(author = name, count = papers.len(), "arXiv author search complete");
    Ok(papers)
  }

  async fn search_by_keywords(
    &self,
    keywords: &[String],
    max_results: usize,
  ) -> Result<Vec<Paper>> {
    let query =
      keywords.iter().map(|k| format!("\"{k}\"")).collect::<Vec<_>>().join(" AND ");
    let papers = self.query(&query, max_results).await?;
    debug!(?keywords, count = papers.len(), "arXiv keyword search complete");
    Ok(papers)
  }
}

/// Normalizes one feed entry into the canonical paper shape.
fn entry_to_paper(entry: &Entry) -> Paper {
  let arxiv_id = ABS_ID
    .captures(&entry.id)
    .and_then(|cap| cap.get(1))
    .map(|m| m.as_str().to_string());

  Paper {
    title:            normalize::clean_text(&entry.title),
    authors:          entry.authors.iter().map(|a| Author::named(&a.name)).collect(),
    abstract_text:    normalize::clean_text(&entry.summary),
    publication_date: normalize::parse_publication_date(&entry.published),
    arxiv_id,
    pubmed_id:        None,
    doi:              entry.doi.clone(),
    journal:          entry.journal_ref.as_deref().map(normalize::clean_text),
    citation_count:   0,
    keywords:         entry.categories.iter().map(|c| c.term.clone()).collect(),
    institutions:     vec![],
    source:           PaperSource::Arxiv,
  }
}
