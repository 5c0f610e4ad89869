//! Database records and row conversions.
//!
//! Raw rows are read inside connection closures and converted to domain
//! types once the call returns, so fallible parsing (source tags, JSON
//! lists) happens outside the database thread.

use rusqlite::Row;

use super::*;
use crate::paper::{Author, Paper, PaperSource};

/// A stored paper together with its row id.
#[derive(Debug, Clone)]
pub struct PaperRecord {
  /// Row id assigned by the store
  pub id:    i64,
  /// The paper as collected
  pub paper: Paper,
}

/// An aggregated co-authorship relation between two authors.
///
/// The pair is canonical: `author1 < author2` by name, so each unordered
/// pair appears exactly once. `paper_count` always equals the number of
/// entries in `paper_ids`.
#[derive(Debug, Clone)]
pub struct CollaborationRecord {
  /// Lexicographically smaller author name
  pub author1:             String,
  /// Lexicographically larger author name
  pub author2:             String,
  /// Number of papers the pair shares
  pub paper_count:         u32,
  /// Publication date of the earliest shared paper
  pub first_collaboration: NaiveDate,
  /// Publication date of the latest shared paper
  pub last_collaboration:  NaiveDate,
  /// Row ids of the shared papers
  pub paper_ids:           Vec<i64>,
}

/// A named grouping of papers.
#[derive(Debug, Clone)]
pub struct CollectionRecord {
  /// Row id assigned by the store
  pub id:          i64,
  /// Collection name
  pub name:        String,
  /// Free-form description
  pub description: String,
  /// Who created the collection
  pub created_by:  String,
  /// Row ids of the member papers
  pub paper_ids:   Vec<i64>,
}

/// Raw paper row as stored, prior to domain conversion.
#[derive(Debug)]
pub(crate) struct PaperRow {
  /// Row id
  pub id:               i64,
  /// Stored title
  pub title:            String,
  /// Stored abstract
  pub abstract_text:    String,
  /// Stored publication date
  pub publication_date: NaiveDate,
  /// Stored arXiv identifier
  pub arxiv_id:         Option<String>,
  /// Stored PubMed identifier
  pub pubmed_id:        Option<String>,
  /// Stored DOI
  pub doi:              Option<String>,
  /// Stored journal name
  pub journal:          Option<String>,
  /// Stored citation count
  pub citation_count:   i64,
  /// Keywords as a JSON array string
  pub keywords:         String,
  /// Institutions as a JSON array string
  pub institutions:     String,
  /// Source tag as stored
  pub source:           String,
}

impl PaperRow {
  /// Creates a raw row from a `SELECT` over the canonical column order.
  pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      title:            row.get(1)?,
      abstract_text:    row.get(2)?,
      publication_date: row.get(3)?,
      arxiv_id:         row.get(4)?,
      pubmed_id:        row.get(5)?,
      doi:              row.get(6)?,
      journal:          row.get(7)?,
      citation_count:   row.get(8)?,
      keywords:         row.get(9)?,
      institutions:     row.get(10)?,
      source:           row.get(11)?,
    })
  }

  /// Converts this row and its author list into a domain record.
  pub fn into_record(self, authors: Vec<Author>) -> Result<PaperRecord> {
    Ok(PaperRecord {
      id:    self.id,
      paper: Paper {
        title:            self.title,
        authors,
        abstract_text:    self.abstract_text,
        publication_date: self.publication_date,
        arxiv_id:         self.arxiv_id,
        pubmed_id:        self.pubmed_id,
        doi:              self.doi,
        journal:          self.journal,
        citation_count:   self.citation_count,
        keywords:         serde_json::from_str(&self.keywords)?,
        institutions:     serde_json::from_str(&self.institutions)?,
        source:           PaperSource::from_str(&self.source)?,
      },
    })
  }
}

/// Column list matching [`PaperRow::from_row`].
pub(crate) const PAPER_COLUMNS: &str = "id, title, abstract_text, publication_date, arxiv_id, \
   pubmed_id, doi, journal, citation_count, keywords, institutions, source";

/// Loads one paper row by id.
pub(crate) fn load_paper(conn: &rusqlite::Connection, id: i64) -> rusqlite::Result<PaperRow> {
  conn.query_row(
    &format!("SELECT {PAPER_COLUMNS} FROM papers WHERE id = ?1"),
    rusqlite::params![id],
    PaperRow::from_row,
  )
}

/// Loads a paper's authors in citation order.
pub(crate) fn load_authors(
  conn: &rusqlite::Connection,
  paper_id: i64,
) -> rusqlite::Result<Vec<Author>> {
  let mut stmt = conn.prepare_cached(
    "SELECT a.name, a.affiliation, a.email, a.orcid
         FROM authors a
         JOIN paper_authors pa ON pa.author_id = a.id
         WHERE pa.paper_id = ?1
         ORDER BY pa.author_order",
  )?;

  let authors = stmt
    .query_map(rusqlite::params![paper_id], |row| {
      Ok(Author {
        name:        row.get(0)?,
        affiliation: row.get(1)?,
        email:       row.get(2)?,
        orcid:       row.get(3)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  Ok(authors)
}
