//! Canonical paper and author metadata types.
//!
//! Every source collector normalizes its responses into the [`Paper`] shape
//! defined here, so the store and the graph builder never see
//! source-specific payloads. The module handles:
//!
//! - Paper metadata with optional external identifiers
//! - Author information in citation order
//! - The identifier-priority unique key used for deduplication
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use collabnet::paper::{Author, Paper, PaperSource};
//!
//! let paper = Paper {
//!   title: "Attention Is All You Need".into(),
//!   authors: vec![Author::named("Ashish Vaswani")],
//!   abstract_text: String::new(),
//!   publication_date: NaiveDate::from_ymd_opt(2017, 6, 12).unwrap(),
//!   arxiv_id: Some("1706.03762".into()),
//!   pubmed_id: None,
//!   doi: None,
//!   journal: None,
//!   citation_count: 0,
//!   keywords: vec!["cs.CL".into()],
//!   institutions: vec![],
//!   source: PaperSource::Arxiv,
//! };
//! assert_eq!(paper.unique_id(), "arxiv:1706.03762");
//! ```

use super::*;

/// Complete representation of an academic paper with metadata.
///
/// This struct is the single canonical shape shared by all collectors and
/// the store. Author order is citation order, not alphabetical. External
/// identifiers are each globally unique when present and drive the
/// deduplication priority (see [`Paper::unique_id`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
  /// The paper's full title
  pub title:            String,
  /// Authors in original citation order
  pub authors:          Vec<Author>,
  /// Full abstract or summary text
  pub abstract_text:    String,
  /// Publication date as a calendar date
  pub publication_date: NaiveDate,
  /// Optional arXiv identifier (e.g., "2301.07041")
  pub arxiv_id:         Option<String>,
  /// Optional PubMed identifier
  pub pubmed_id:        Option<String>,
  /// Optional DOI reference
  pub doi:              Option<String>,
  /// Journal or venue name when known
  pub journal:          Option<String>,
  /// Citation count as reported by the richest source seen
  pub citation_count:   i64,
  /// Keyword or subject-category tags
  pub keywords:         Vec<String>,
  /// Institutional affiliations reported for the paper
  pub institutions:     Vec<String>,
  /// Source repository the record was collected from
  pub source:           PaperSource,
}

/// Author information for academic papers.
///
/// Author identity is the exact name string: two spellings of the same
/// person are two distinct authors. This is a deliberate limitation of the
/// collection pipeline, not something the store tries to resolve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
  /// Author's full name, the unique identity key
  pub name:        String,
  /// Optional institutional affiliation
  pub affiliation: Option<String>,
  /// Optional contact email
  pub email:       Option<String>,
  /// Optional ORCID identifier
  pub orcid:       Option<String>,
}

impl Author {
  /// Creates an author carrying only a name.
  ///
  /// Most sources report nothing beyond the name, so this is the common
  /// construction path in collectors.
  pub fn named(name: impl Into<String>) -> Self {
    Self { name: name.into(), affiliation: None, email: None, orcid: None }
  }
}

/// Source repository a paper was collected from.
///
/// The tag travels with every [`Paper`] so downstream consumers can tell
/// which API produced a record, and it round-trips through the database as
/// a lowercase string.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PaperSource {
  /// arXiv.org query API
  Arxiv,
  /// PubMed E-utilities
  Pubmed,
  /// Semantic Scholar Graph API
  SemanticScholar,
  /// Manually entered record
  Manual,
  /// Unknown provenance
  Unknown,
}

impl Paper {
  /// Returns the deduplication key for this paper.
  ///
  /// The key is deterministic and injective over the identifier priority
  /// `arxiv_id > pubmed_id > doi > (title, publication_date)`: two papers
  /// produce the same key exactly when the store considers them the same
  /// record.
  ///
  /// # Examples
  ///
  /// ```
  /// # use chrono::NaiveDate;
  /// # use collabnet::paper::{Paper, PaperSource};
  /// let mut paper = Paper {
  ///   title: "A Study".into(),
  ///   authors: vec![],
  ///   abstract_text: String::new(),
  ///   publication_date: NaiveDate::from_ymd_opt(2023, 1, 17).unwrap(),
  ///   arxiv_id: None,
  ///   pubmed_id: None,
  ///   doi: Some("10.1234/test".into()),
  ///   journal: None,
  ///   citation_count: 0,
  ///   keywords: vec![],
  ///   institutions: vec![],
  ///   source: PaperSource::Unknown,
  /// };
  /// assert_eq!(paper.unique_id(), "doi:10.1234/test");
  ///
  /// paper.doi = None;
  /// assert_eq!(paper.unique_id(), "title:2023-01-17:A Study");
  /// ```
  pub fn unique_id(&self) -> String {
    if let Some(id) = &self.arxiv_id {
      format!("arxiv:{id}")
    } else if let Some(id) = &self.pubmed_id {
      format!("pubmed:{id}")
    } else if let Some(doi) = &self.doi {
      format!("doi:{doi}")
    } else {
      format!("title:{}:{}", self.publication_date, self.title)
    }
  }
}

impl Display for PaperSource {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      PaperSource::Arxiv => write!(f, "arxiv"),
      PaperSource::Pubmed => write!(f, "pubmed"),
      PaperSource::SemanticScholar => write!(f, "semantic_scholar"),
      PaperSource::Manual => write!(f, "manual"),
      PaperSource::Unknown => write!(f, "unknown"),
    }
  }
}

impl FromStr for PaperSource {
  type Err = CollabnetError;

  fn from_str(s: &str) -> Result<Self> {
    match &s.to_lowercase() as &str {
      "arxiv" => Ok(PaperSource::Arxiv),
      "pubmed" => Ok(PaperSource::Pubmed),
      "semantic_scholar" => Ok(PaperSource::SemanticScholar),
      "manual" => Ok(PaperSource::Manual),
      "unknown" => Ok(PaperSource::Unknown),
      s => Err(CollabnetError::InvalidSource(s.to_owned())),
    }
  }
}
