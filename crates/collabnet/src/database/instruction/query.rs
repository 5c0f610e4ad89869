use super::*;

/// Read access to stored papers.
pub struct Query {
  kind: QueryKind,
}

enum QueryKind {
  All,
  ByAuthor(String),
}

impl Query {
  /// Every stored paper, oldest row first.
  pub fn list_all() -> Self { Self { kind: QueryKind::All } }

  /// Papers listing the given author by exact name.
  pub fn by_author(name: &str) -> Self { Self { kind: QueryKind::ByAuthor(name.to_string()) } }
}

#[async_trait]
impl DatabaseInstruction for Query {
  type Output = Vec<PaperRecord>;

  async fn execute(&self, db: &mut Database) -> Result<Self::Output> {
    let sql = match &self.kind {
      QueryKind::All => format!("SELECT {PAPER_COLUMNS} FROM papers ORDER BY id"),
      QueryKind::ByAuthor(_) => format!(
        "SELECT {PAPER_COLUMNS} FROM papers WHERE id IN (
                    SELECT pa.paper_id FROM paper_authors pa
                    JOIN authors a ON a.id = pa.author_id
                    WHERE a.name = ?1
                ) ORDER BY id"
      ),
    };
    let bound = match &self.kind {
      QueryKind::All => None,
      QueryKind::ByAuthor(name) => Some(name.clone()),
    };

    let rows = db
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(&sql)?;
        let rows = match &bound {
          Some(name) => stmt.query_map(params![name], PaperRow::from_row)?,
          None => stmt.query_map([], PaperRow::from_row)?,
        }
        .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
          let authors = load_authors(conn, row.id)?;
          out.push((row, authors));
        }
        Ok(out)
      })
      .await?;

    rows.into_iter().map(|(row, authors)| row.into_record(authors)).collect()
  }
}

/// Authors ranked by how many distinct co-authors they have.
///
/// Frequency is the author's collaboration degree: the number of
/// collaboration rows the author appears in. Equal degrees keep
/// first-insertion order; no finer tie-break is defined.
pub struct AuthorFrequency {
  limit: usize,
}

impl AuthorFrequency {
  pub fn top(limit: usize) -> Self { Self { limit } }
}

#[async_trait]
impl DatabaseInstruction for AuthorFrequency {
  type Output = Vec<(String, u32)>;

  async fn execute(&self, db: &mut Database) -> Result<Self::Output> {
    let limit = self.limit;

    let ranked = db
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(
          "SELECT a.name, COUNT(*) AS degree
                     FROM (
                         SELECT author1_id AS author_id FROM collaborations
                         UNION ALL
                         SELECT author2_id AS author_id FROM collaborations
                     ) c
                     JOIN authors a ON a.id = c.author_id
                     GROUP BY c.author_id
                     ORDER BY degree DESC, a.id
                     LIMIT ?1",
        )?;

        let ranked = stmt
          .query_map(params![limit as i64], |row| Ok((row.get(0)?, row.get(1)?)))?
          .collect::<rusqlite::Result<Vec<(String, u32)>>>()?;
        Ok(ranked)
      })
      .await?;

    Ok(ranked)
  }
}

/// Read access to stored collaboration rows.
pub struct Collaborations {
  between: Option<(String, String)>,
}

impl Collaborations {
  /// Every collaboration row, in creation order.
  pub fn all() -> Self { Self { between: None } }

  /// The collaboration between two authors, if any.
  ///
  /// The pair is canonicalized internally, so argument order is
  /// irrelevant.
  pub fn between(author1: &str, author2: &str) -> Self {
    let (first, second) = if author1 <= author2 {
      (author1.to_string(), author2.to_string())
    } else {
      (author2.to_string(), author1.to_string())
    };
    Self { between: Some((first, second)) }
  }
}

#[async_trait]
impl DatabaseInstruction for Collaborations {
  type Output = Vec<CollaborationRecord>;

  async fn execute(&self, db: &mut Database) -> Result<Self::Output> {
    let between = self.between.clone();

    let records = db
      .conn
      .call(move |conn| {
        let base = "SELECT c.id, a1.name, a2.name, c.paper_count,
                           c.first_collaboration, c.last_collaboration
                    FROM collaborations c
                    JOIN authors a1 ON a1.id = c.author1_id
                    JOIN authors a2 ON a2.id = c.author2_id";

        let rows: Vec<(i64, CollaborationRecord)> = match &between {
          Some((first, second)) => {
            let mut stmt = conn
              .prepare_cached(&format!("{base} WHERE a1.name = ?1 AND a2.name = ?2"))?;
            let rows = stmt
              .query_map(params![first, second], collaboration_from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
          },
          None => {
            let mut stmt = conn.prepare_cached(&format!("{base} ORDER BY c.id"))?;
            let rows = stmt
              .query_map([], collaboration_from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
          },
        };

        let mut papers_stmt = conn.prepare_cached(
          "SELECT paper_id FROM collaboration_papers
                     WHERE collaboration_id = ?1 ORDER BY paper_id",
        )?;

        let mut records = Vec::with_capacity(rows.len());
        for (id, mut record) in rows {
          record.paper_ids = papers_stmt
            .query_map(params![id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<i64>>>()?;
          records.push(record);
        }
        Ok(records)
      })
      .await?;

    Ok(records)
  }
}

/// Maps a joined collaboration row, leaving the paper set to be filled in.
fn collaboration_from_row(row: &rusqlite::Row) -> rusqlite::Result<(i64, CollaborationRecord)> {
  Ok((row.get(0)?, CollaborationRecord {
    author1:             row.get(1)?,
    author2:             row.get(2)?,
    paper_count:         row.get(3)?,
    first_collaboration: row.get(4)?,
    last_collaboration:  row.get(5)?,
    paper_ids:           vec![],
  }))
}
