use collabnet::{
  database::{
    AddToCollection, Collaborations, CreateCollection, DatabaseInstruction, ListCollections,
    Query, Save,
  },
  paper::Author,
};

use crate::{create_test_paper, date, paper_with_authors, setup_test_db, traced_test, TestResult};

/// Deduplication by identifier priority
mod deduplication {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_store_creates_record() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;
    let paper = create_test_paper();

    let (stored, created) = Save::paper(&paper).execute(&mut db).await?;
    assert!(created);
    assert_eq!(stored.paper.title, paper.title);
    assert_eq!(stored.paper.authors.len(), 2);
    assert_eq!(stored.paper.keywords, vec!["cs.CR".to_string()]);

    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_same_arxiv_id_stores_once() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;
    let paper = create_test_paper();

    let (first, created) = Save::paper(&paper).execute(&mut db).await?;
    assert!(created);

    // A re-collected copy with a different abstract still resolves to the
    // stored record; first write wins.
    let mut copy = paper.clone();
    copy.abstract_text = "Refreshed abstract".into();
    let (second, created) = Save::paper(&copy).execute(&mut db).await?;
    assert!(!created);
    assert_eq!(second.id, first.id);
    assert_eq!(second.paper.abstract_text, paper.abstract_text);

    let all = Query::list_all().execute(&mut db).await?;
    assert_eq!(all.len(), 1);

    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_identifier_priority_over_doi() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;
    let mut paper = create_test_paper();
    paper.doi = Some("10.1234/original".into());
    let (first, _) = Save::paper(&paper).execute(&mut db).await?;

    // Same arXiv id but a different DOI: the arXiv match wins before the
    // DOI is ever consulted.
    let mut other = paper.clone();
    other.doi = Some("10.1234/different".into());
    let (second, created) = Save::paper(&other).execute(&mut db).await?;
    assert!(!created);
    assert_eq!(second.id, first.id);

    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_title_date_composite_fallback() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;
    let paper = paper_with_authors("A Study", None, date(2020, 5, 1), &["A. Smith"]);

    let (first, created) = Save::paper(&paper).execute(&mut db).await?;
    assert!(created);

    let (second, created) = Save::paper(&paper).execute(&mut db).await?;
    assert!(!created);
    assert_eq!(second.id, first.id);

    // Same title on a different date is a different paper.
    let later = paper_with_authors("A Study", None, date(2021, 5, 1), &["A. Smith"]);
    let (_, created) = Save::paper(&later).execute(&mut db).await?;
    assert!(created);

    Ok(())
  }
}

/// Author and join-row materialization
mod authors {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_author_order_is_citation_order() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;
    let paper = paper_with_authors(
      "Ordered",
      Some("2301.00001"),
      date(2023, 1, 1),
      &["Z. Zeta", "A. Alpha", "M. Middle"],
    );

    let (stored, _) = Save::paper(&paper).execute(&mut db).await?;
    let names: Vec<&str> = stored.paper.authors.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Z. Zeta", "A. Alpha", "M. Middle"]);

    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_authors_are_shared_across_papers() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;
    let first =
      paper_with_authors("First", Some("2301.00001"), date(2023, 1, 1), &["A. Smith", "B. Jones"]);
    let second =
      paper_with_authors("Second", Some("2301.00002"), date(2023, 2, 1), &["A. Smith", "C. Lee"]);

    Save::paper(&first).execute(&mut db).await?;
    Save::paper(&second).execute(&mut db).await?;

    let smith_papers = Query::by_author("A. Smith").execute(&mut db).await?;
    assert_eq!(smith_papers.len(), 2);

    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_duplicate_name_in_author_list() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;
    let paper = paper_with_authors(
      "Duplicated",
      Some("2301.00003"),
      date(2023, 1, 1),
      &["A. Smith", "A. Smith", "B. Jones"],
    );

    let (stored, _) = Save::paper(&paper).execute(&mut db).await?;
    // The join row is unique per (paper, author), so the repeat collapses.
    assert_eq!(stored.paper.authors.len(), 2);

    let collaborations = Collaborations::all().execute(&mut db).await?;
    assert_eq!(collaborations.len(), 1);

    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_author_details_are_kept() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;
    let mut paper = create_test_paper();
    paper.authors = vec![
      Author {
        name:        "Test Author 1".into(),
        affiliation: Some("University 1".into()),
        email:       Some("email1@test.com".into()),
        orcid:       None,
      },
      Author::named("Test Author 2"),
    ];

    let (stored, _) = Save::paper(&paper).execute(&mut db).await?;
    assert_eq!(stored.paper.authors[0].affiliation, Some("University 1".into()));
    assert_eq!(stored.paper.authors[1].name, "Test Author 2");

    Ok(())
  }
}

/// Collaboration upsert semantics
mod collaborations {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_pairwise_rows_for_three_authors() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;
    let paper = paper_with_authors(
      "Shared",
      Some("2301.00010"),
      date(2023, 3, 1),
      &["A. Smith", "B. Jones", "C. Lee"],
    );

    Save::paper(&paper).execute(&mut db).await?;

    let rows = Collaborations::all().execute(&mut db).await?;
    assert_eq!(rows.len(), 3);
    for row in &rows {
      assert!(row.author1 < row.author2);
      assert_eq!(row.paper_count, 1);
      assert_eq!(row.paper_ids.len(), 1);
      assert_eq!(row.first_collaboration, date(2023, 3, 1));
      assert_eq!(row.last_collaboration, date(2023, 3, 1));
    }

    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_upsert_is_commutative() -> TestResult<()> {
    let (mut db1, _dir1) = setup_test_db().await;
    let (mut db2, _dir2) = setup_test_db().await;

    let forward =
      paper_with_authors("Same", Some("2301.00011"), date(2023, 1, 1), &["A. Smith", "B. Jones"]);
    let reversed =
      paper_with_authors("Same", Some("2301.00011"), date(2023, 1, 1), &["B. Jones", "A. Smith"]);

    Save::paper(&forward).execute(&mut db1).await?;
    Save::paper(&reversed).execute(&mut db2).await?;

    let rows1 = Collaborations::all().execute(&mut db1).await?;
    let rows2 = Collaborations::all().execute(&mut db2).await?;
    assert_eq!(rows1.len(), 1);
    assert_eq!(rows1[0].author1, rows2[0].author1);
    assert_eq!(rows1[0].author2, rows2[0].author2);

    // Lookup is order-insensitive too.
    let found = Collaborations::between("B. Jones", "A. Smith").execute(&mut db1).await?;
    assert_eq!(found.len(), 1);

    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_paper_count_tracks_shared_set() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;
    let first =
      paper_with_authors("First", Some("2301.00012"), date(2022, 6, 1), &["A. Smith", "B. Jones"]);
    let second =
      paper_with_authors("Second", Some("2301.00013"), date(2023, 9, 1), &["A. Smith", "B. Jones"]);

    Save::paper(&first).execute(&mut db).await?;
    Save::paper(&second).execute(&mut db).await?;
    // Replaying the same paper must not inflate the count.
    Save::paper(&second).execute(&mut db).await?;

    let rows = Collaborations::all().execute(&mut db).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].paper_count, 2);
    assert_eq!(rows[0].paper_count as usize, rows[0].paper_ids.len());
    assert_eq!(rows[0].first_collaboration, date(2022, 6, 1));
    assert_eq!(rows[0].last_collaboration, date(2023, 9, 1));

    Ok(())
  }
}

/// Collection grouping
mod collections {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_create_add_list() -> TestResult<()> {
    let (mut db, _dir) = setup_test_db().await;
    let (stored, _) = Save::paper(&create_test_paper()).execute(&mut db).await?;

    let collection_id =
      CreateCollection::new("FHE", "Homomorphic encryption papers", "tester")
        .execute(&mut db)
        .await?;
    AddToCollection::new(collection_id, stored.id).execute(&mut db).await?;
    // Re-adding is a no-op.
    AddToCollection::new(collection_id, stored.id).execute(&mut db).await?;

    let collections = ListCollections.execute(&mut db).await?;
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].name, "FHE");
    assert_eq!(collections[0].paper_ids, vec![stored.id]);

    Ok(())
  }
}
