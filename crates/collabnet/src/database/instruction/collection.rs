use super::*;

/// Creates a named collection of papers.
pub struct CreateCollection {
  name:        String,
  description: String,
  created_by:  String,
}

impl CreateCollection {
  pub fn new(name: &str, description: &str, created_by: &str) -> Self {
    Self {
      name:        name.to_string(),
      description: description.to_string(),
      created_by:  created_by.to_string(),
    }
  }
}

#[async_trait]
impl DatabaseInstruction for CreateCollection {
  type Output = i64;

  async fn execute(&self, db: &mut Database) -> Result<Self::Output> {
    let (name, description, created_by) =
      (self.name.clone(), self.description.clone(), self.created_by.clone());

    let id = db
      .conn
      .call(move |conn| {
        let id = conn.query_row(
          "INSERT INTO collections (name, description, created_by)
                     VALUES (?1, ?2, ?3) RETURNING id",
          params![name, description, created_by],
          |row| row.get(0),
        )?;
        Ok(id)
      })
      .await?;

    Ok(id)
  }
}

/// Adds a stored paper to a collection; re-adding is a no-op.
pub struct AddToCollection {
  collection_id: i64,
  paper_id:      i64,
}

impl AddToCollection {
  pub fn new(collection_id: i64, paper_id: i64) -> Self { Self { collection_id, paper_id } }
}

#[async_trait]
impl DatabaseInstruction for AddToCollection {
  type Output = ();

  async fn execute(&self, db: &mut Database) -> Result<Self::Output> {
    let (collection_id, paper_id) = (self.collection_id, self.paper_id);

    db.conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO collection_papers (collection_id, paper_id)
                     VALUES (?1, ?2)",
          params![collection_id, paper_id],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }
}

/// Lists every collection with its member paper ids.
pub struct ListCollections;

#[async_trait]
impl DatabaseInstruction for ListCollections {
  type Output = Vec<CollectionRecord>;

  async fn execute(&self, db: &mut Database) -> Result<Self::Output> {
    let collections = db
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare_cached(
          "SELECT id, name, description, created_by FROM collections ORDER BY id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(CollectionRecord {
              id:          row.get(0)?,
              name:        row.get(1)?,
              description: row.get(2)?,
              created_by:  row.get(3)?,
              paper_ids:   vec![],
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut papers_stmt = conn.prepare_cached(
          "SELECT paper_id FROM collection_papers
                     WHERE collection_id = ?1 ORDER BY paper_id",
        )?;

        let mut collections = Vec::with_capacity(rows.len());
        for mut record in rows {
          record.paper_ids = papers_stmt
            .query_map(params![record.id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<i64>>>()?;
          collections.push(record);
        }
        Ok(collections)
      })
      .await?;

    Ok(collections)
  }
}
