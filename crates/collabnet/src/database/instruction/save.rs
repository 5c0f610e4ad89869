use super::*;
use crate::paper::{Author, Paper};

/// Deduplicating store of one collected paper.
///
/// Lookup order is `arxiv_id`, then `pubmed_id`, then `doi`, then the
/// `(title, publication_date)` composite. The first match wins and the
/// stored record is returned unchanged with `created = false`; otherwise
/// the paper, its authors, the positional author joins, and the pairwise
/// collaboration rows are written in one transaction.
pub struct Save {
  paper: Paper,
}

impl Save {
  pub fn paper(paper: &Paper) -> Self { Self { paper: paper.clone() } }
}

#[async_trait]
impl DatabaseInstruction for Save {
  type Output = (PaperRecord, bool);

  async fn execute(&self, db: &mut Database) -> Result<Self::Output> {
    let paper = self.paper.clone();
    let keywords = serde_json::to_string(&paper.keywords)?;
    let institutions = serde_json::to_string(&paper.institutions)?;

    let (row, authors, created) = db
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        if let Some(existing) = find_existing(&tx, &paper)? {
          let row = load_paper(&tx, existing)?;
          let authors = load_authors(&tx, existing)?;
          return Ok((row, authors, false));
        }

        let paper_id = insert_paper(&tx, &paper, &keywords, &institutions)?;
        let authors = insert_authors(&tx, paper_id, &paper.authors)?;
        upsert_collaborations(&tx, paper_id, paper.publication_date, &authors)?;

        let row = load_paper(&tx, paper_id)?;
        let authors = load_authors(&tx, paper_id)?;
        tx.commit()?;
        Ok((row, authors, true))
      })
      .await?;

    Ok((row.into_record(authors)?, created))
  }
}

/// Identifier-priority lookup for an already-stored equivalent.
fn find_existing(conn: &rusqlite::Connection, paper: &Paper) -> rusqlite::Result<Option<i64>> {
  for (column, value) in [
    ("arxiv_id", &paper.arxiv_id),
    ("pubmed_id", &paper.pubmed_id),
    ("doi", &paper.doi),
  ] {
    if let Some(value) = value {
      let found = conn
        .query_row(
          &format!("SELECT id FROM papers WHERE {column} = ?1"),
          params![value],
          |row| row.get(0),
        )
        .optional()?;
      if found.is_some() {
        return Ok(found);
      }
    }
  }

  conn
    .query_row(
      "SELECT id FROM papers WHERE title = ?1 AND publication_date = ?2",
      params![paper.title, paper.publication_date],
      |row| row.get(0),
    )
    .optional()
}

fn insert_paper(
  conn: &rusqlite::Connection,
  paper: &Paper,
  keywords: &str,
  institutions: &str,
) -> rusqlite::Result<i64> {
  let mut stmt = conn.prepare_cached(
    "INSERT INTO papers (
            title, abstract_text, publication_date, arxiv_id, pubmed_id,
            doi, journal, citation_count, keywords, institutions, source
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        RETURNING id",
  )?;

  stmt.query_row(
    params![
      paper.title,
      paper.abstract_text,
      paper.publication_date,
      paper.arxiv_id,
      paper.pubmed_id,
      paper.doi,
      paper.journal,
      paper.citation_count,
      keywords,
      institutions,
      paper.source.to_string(),
    ],
    |row| row.get(0),
  )
}

/// Creates or looks up each author by exact name and joins them to the
/// paper with their citation-order position. Returns the distinct authors
/// in first-appearance order for the collaboration pass.
fn insert_authors(
  conn: &rusqlite::Connection,
  paper_id: i64,
  authors: &[Author],
) -> rusqlite::Result<Vec<(i64, String)>> {
  let mut upsert = conn.prepare_cached(
    "INSERT INTO authors (name, affiliation, email, orcid)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (name) DO NOTHING",
  )?;
  let mut select = conn.prepare_cached("SELECT id FROM authors WHERE name = ?1")?;
  let mut join = conn.prepare_cached(
    "INSERT OR IGNORE INTO paper_authors (paper_id, author_id, author_order)
         VALUES (?1, ?2, ?3)",
  )?;

  let mut distinct: Vec<(i64, String)> = Vec::new();
  for (order, author) in authors.iter().enumerate() {
    upsert.execute(params![author.name, author.affiliation, author.email, author.orcid])?;
    let author_id: i64 = select.query_row(params![author.name], |row| row.get(0))?;
    join.execute(params![paper_id, author_id, order as i64])?;

    if !distinct.iter().any(|(id, _)| *id == author_id) {
      distinct.push((author_id, author.name.clone()));
    }
  }
  Ok(distinct)
}

/// Upserts one collaboration row per unordered pair of the paper's authors.
///
/// The pair is canonicalized by name before the upsert so [A, B] and
/// [B, A] land on the same row. `paper_count` is recomputed from the
/// shared-paper join, which keeps it equal to the set's cardinality even
/// on replays.
fn upsert_collaborations(
  conn: &rusqlite::Connection,
  paper_id: i64,
  date: NaiveDate,
  authors: &[(i64, String)],
) -> rusqlite::Result<()> {
  for i in 0..authors.len() {
    for j in (i + 1)..authors.len() {
      let (first, second) = if authors[i].1 <= authors[j].1 {
        (&authors[i], &authors[j])
      } else {
        (&authors[j], &authors[i])
      };

      let existing: Option<i64> = conn
        .query_row(
          "SELECT id FROM collaborations WHERE author1_id = ?1 AND author2_id = ?2",
          params![first.0, second.0],
          |row| row.get(0),
        )
        .optional()?;

      let collaboration_id = match existing {
        Some(id) => id,
        None => conn.query_row(
          "INSERT INTO collaborations (
                        author1_id, author2_id, paper_count,
                        first_collaboration, last_collaboration
                    ) VALUES (?1, ?2, 0, ?3, ?3)
                    RETURNING id",
          params![first.0, second.0, date],
          |row| row.get(0),
        )?,
      };

      conn.execute(
        "INSERT OR IGNORE INTO collaboration_papers (collaboration_id, paper_id)
                 VALUES (?1, ?2)",
        params![collaboration_id, paper_id],
      )?;
      conn.execute(
        "UPDATE collaborations SET
                    paper_count = (SELECT COUNT(*) FROM collaboration_papers
                                   WHERE collaboration_id = ?1),
                    first_collaboration = MIN(first_collaboration, ?2),
                    last_collaboration = MAX(last_collaboration, ?2)
                 WHERE id = ?1",
        params![collaboration_id, date],
      )?;
    }
  }
  Ok(())
}
