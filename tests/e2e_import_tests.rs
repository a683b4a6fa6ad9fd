//! End-to-end tests for the import pipeline
//!
//! Each test writes a small CSV fixture, runs it through load -> clean ->
//! transform, persists the result with the SQLite store and asserts on the
//! database with plain SQL.

use books_normalizer::book_store::{BookStore, SqliteBookStore};
use books_normalizer::dataset::load_books;
use books_normalizer::normalize::{clean, transform, NormalizedDataset, StarCountsPolicy};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HEADER: [&str; 25] = [
    "bookId",
    "title",
    "series",
    "author",
    "rating",
    "description",
    "language",
    "isbn",
    "genres",
    "characters",
    "bookFormat",
    "edition",
    "pages",
    "publisher",
    "publishDate",
    "firstPublishDate",
    "awards",
    "numRatings",
    "ratingsByStars",
    "likedPercent",
    "setting",
    "coverImg",
    "bbeScore",
    "bbeVotes",
    "price",
];

/// A fixture row with every cell empty except the ones a test fills in.
fn empty_row(book_id: &str) -> Vec<String> {
    let mut row = vec![String::new(); 25];
    row[0] = book_id.to_string();
    row
}

fn hunger_games_row() -> Vec<String> {
    let mut row = empty_row("2767052-the-hunger-games");
    row[1] = "The Hunger Games".to_string();
    row[3] = "Suzanne Collins".to_string();
    row[4] = "4.33".to_string();
    row[8] = "['Young Adult', 'Fiction']".to_string();
    row[9] = "['Katniss Everdeen', 'Peeta Mellark']".to_string();
    row[12] = "374 pages".to_string();
    row[13] = "Scholastic Press".to_string();
    row[14] = "September 14, 2008".to_string();
    row[16] = "['Locus Award (2009)']".to_string();
    row[17] = "6376780".to_string();
    row[18] = "['3444695', '1921313', '745221', '171994', '93557']".to_string();
    row[19] = "96.0".to_string();
    row[20] = "['Panem (Fictional)']".to_string();
    row[22] = "2993816".to_string();
    row[23] = "30516".to_string();
    row[24] = "5.09".to_string();
    row
}

fn twilight_row() -> Vec<String> {
    let mut row = empty_row("41865.Twilight");
    row[1] = "Twilight".to_string();
    row[3] = "Stephenie Meyer".to_string();
    row[8] = "['Fiction', 'Romance']".to_string();
    row[14] = "2006-09-06".to_string();
    row[18] = "[1, 2, 3, 4, 5]".to_string();
    row
}

fn write_fixture(dir: &Path, rows: &[Vec<String>]) -> PathBuf {
    let csv_path = dir.join("books.csv");
    let mut writer = csv::Writer::from_path(&csv_path).unwrap();
    writer.write_record(HEADER).unwrap();
    for row in rows {
        writer.write_record(row).unwrap();
    }
    writer.flush().unwrap();
    csv_path
}

/// Run the whole pipeline over fixture rows and persist into `db_path`.
fn import(dir: &Path, db_path: &Path, rows: &[Vec<String>], policy: StarCountsPolicy) {
    let csv_path = write_fixture(dir, rows);
    let raw = load_books(&csv_path).unwrap();
    let records = clean(raw);
    let dataset = transform(&records, policy).unwrap();

    let store = SqliteBookStore::new(db_path).unwrap();
    persist(&store, &dataset);
}

fn persist(store: &dyn BookStore, dataset: &NormalizedDataset) {
    store.insert_books(&dataset.books).unwrap();
    for facet in &dataset.facets {
        store.insert_dimension(facet.kind, &facet.dimension).unwrap();
        store.insert_bridge(facet.kind, &facet.bridge).unwrap();
    }
    store
        .insert_publication_info(&dataset.publication_info)
        .unwrap();
    store.insert_ratings(&dataset.ratings_and_bbe_scores).unwrap();
}

fn query_i64(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

// =============================================================================
// Schema and base table
// =============================================================================

#[test]
fn test_import_creates_all_thirteen_tables() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("books.db");
    import(
        dir.path(),
        &db_path,
        &[hunger_games_row()],
        StarCountsPolicy::Strict,
    );

    let conn = Connection::open(&db_path).unwrap();
    let count = query_i64(
        &conn,
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
    );
    assert_eq!(count, 13);
}

#[test]
fn test_books_sorted_deduplicated_and_densely_indexed() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("books.db");
    let mut duplicate = empty_row("2767052-reissue");
    duplicate[1] = "The Hunger Games (reissue)".to_string();
    duplicate[18] = "[0, 0, 0, 0, 0]".to_string();
    // File order: high id, low id, duplicate of the low id
    import(
        dir.path(),
        &db_path,
        &[twilight_row(), hunger_games_row(), duplicate],
        StarCountsPolicy::Strict,
    );

    let conn = Connection::open(&db_path).unwrap();
    let mut stmt = conn
        .prepare("SELECT idx, book_id, title FROM books ORDER BY idx")
        .unwrap();
    let rows: Vec<(i64, i64, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], (1, 41865, "Twilight".to_string()));
    // The first occurrence of 2767052 wins over the reissue row
    assert_eq!(rows[1], (2, 2767052, "The Hunger Games".to_string()));
}

#[test]
fn test_unparsable_book_id_becomes_null_and_sorts_last() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("books.db");
    let mut anonymous = empty_row("not-an-id");
    anonymous[1] = "Mystery Book".to_string();
    anonymous[18] = "[0, 0, 0, 0, 0]".to_string();
    import(
        dir.path(),
        &db_path,
        &[anonymous, hunger_games_row()],
        StarCountsPolicy::Strict,
    );

    let conn = Connection::open(&db_path).unwrap();
    let (idx, title): (i64, String) = conn
        .query_row(
            "SELECT idx, title FROM books WHERE book_id IS NULL",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(idx, 2);
    assert_eq!(title, "Mystery Book");
}

#[test]
fn test_relocated_columns_absent_from_books() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("books.db");
    import(
        dir.path(),
        &db_path,
        &[hunger_games_row()],
        StarCountsPolicy::Strict,
    );

    let conn = Connection::open(&db_path).unwrap();
    let mut stmt = conn.prepare("SELECT * FROM books LIMIT 0").unwrap();
    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    for relocated in ["author", "genres", "awards", "rating", "publish_date"] {
        assert!(
            !columns.contains(&relocated.to_string()),
            "books should not carry column {}",
            relocated
        );
    }
    assert!(columns.contains(&"pages".to_string()));
}

// =============================================================================
// Facets
// =============================================================================

#[test]
fn test_shared_genre_gets_one_dimension_row() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("books.db");
    import(
        dir.path(),
        &db_path,
        &[hunger_games_row(), twilight_row()],
        StarCountsPolicy::Strict,
    );

    let conn = Connection::open(&db_path).unwrap();
    let fiction_rows = query_i64(&conn, "SELECT COUNT(*) FROM genres WHERE genre = 'Fiction'");
    assert_eq!(fiction_rows, 1);

    // Both books reference the single Fiction key through the bridge
    let fiction_books = query_i64(
        &conn,
        "SELECT COUNT(*) FROM genres_books_bridge b \
         JOIN genres g ON g.genre_id = b.genre_id \
         WHERE g.genre = 'Fiction'",
    );
    assert_eq!(fiction_books, 2);
}

#[test]
fn test_bridge_rows_join_back_to_books() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("books.db");
    import(
        dir.path(),
        &db_path,
        &[hunger_games_row(), twilight_row()],
        StarCountsPolicy::Strict,
    );

    let conn = Connection::open(&db_path).unwrap();
    let orphans = query_i64(
        &conn,
        "SELECT COUNT(*) FROM genres_books_bridge b \
         LEFT JOIN books k ON k.book_id = b.book_id \
         WHERE b.book_id IS NOT NULL AND k.book_id IS NULL",
    );
    assert_eq!(orphans, 0);

    let titles_for_romance: Vec<String> = {
        let mut stmt = conn
            .prepare(
                "SELECT k.title FROM books k \
                 JOIN genres_books_bridge b ON b.book_id = k.book_id \
                 JOIN genres g ON g.genre_id = b.genre_id \
                 WHERE g.genre = 'Romance'",
            )
            .unwrap();
        let rows = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        rows
    };
    assert_eq!(titles_for_romance, vec!["Twilight".to_string()]);
}

#[test]
fn test_characters_and_awards_exploded() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("books.db");
    import(
        dir.path(),
        &db_path,
        &[hunger_games_row()],
        StarCountsPolicy::Strict,
    );

    let conn = Connection::open(&db_path).unwrap();
    assert_eq!(query_i64(&conn, "SELECT COUNT(*) FROM characters"), 2);
    let award: String = conn
        .query_row("SELECT award FROM awards", [], |row| row.get(0))
        .unwrap();
    assert_eq!(award, "Locus Award (2009)");
}

#[test]
fn test_settings_dimension_keeps_qualified_place() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("books.db");
    import(
        dir.path(),
        &db_path,
        &[hunger_games_row()],
        StarCountsPolicy::Strict,
    );

    let conn = Connection::open(&db_path).unwrap();
    let setting: String = conn
        .query_row("SELECT setting FROM settings", [], |row| row.get(0))
        .unwrap();
    assert_eq!(setting, "Panem (Fictional)");
}

// =============================================================================
// Detail tables
// =============================================================================

#[test]
fn test_star_counts_expanded_into_five_columns() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("books.db");
    import(
        dir.path(),
        &db_path,
        &[hunger_games_row()],
        StarCountsPolicy::Strict,
    );

    let conn = Connection::open(&db_path).unwrap();
    let (five, one, num_ratings): (i64, i64, i64) = conn
        .query_row(
            "SELECT five_stars, one_star, num_ratings \
             FROM ratings_and_bbe_scores WHERE book_id = 2767052",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!(five, 3444695);
    assert_eq!(one, 93557);
    assert_eq!(num_ratings, 6376780);
}

#[test]
fn test_dates_stored_as_iso_text() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("books.db");
    import(
        dir.path(),
        &db_path,
        &[hunger_games_row(), twilight_row()],
        StarCountsPolicy::Strict,
    );

    let conn = Connection::open(&db_path).unwrap();
    let hunger_date: String = conn
        .query_row(
            "SELECT publish_date FROM publication_info WHERE book_id = 2767052",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(hunger_date, "2008-09-14");

    let twilight_date: String = conn
        .query_row(
            "SELECT publish_date FROM publication_info WHERE book_id = 41865",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(twilight_date, "2006-09-06");
}

#[test]
fn test_detail_tables_have_one_row_per_book() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("books.db");
    import(
        dir.path(),
        &db_path,
        &[hunger_games_row(), twilight_row()],
        StarCountsPolicy::Strict,
    );

    let conn = Connection::open(&db_path).unwrap();
    let books = query_i64(&conn, "SELECT COUNT(*) FROM books");
    assert_eq!(query_i64(&conn, "SELECT COUNT(*) FROM publication_info"), books);
    assert_eq!(
        query_i64(&conn, "SELECT COUNT(*) FROM ratings_and_bbe_scores"),
        books
    );
}

// =============================================================================
// Star-count policies
// =============================================================================

#[test]
fn test_strict_policy_rejects_malformed_star_counts() {
    let dir = TempDir::new().unwrap();
    let mut bad = hunger_games_row();
    bad[18] = "not a list".to_string();
    let csv_path = write_fixture(dir.path(), &[bad]);

    let records = clean(load_books(&csv_path).unwrap());
    assert!(transform(&records, StarCountsPolicy::Strict).is_err());
}

#[test]
fn test_coerce_policy_nulls_star_columns() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("books.db");
    let mut bad = hunger_games_row();
    bad[18] = "not a list".to_string();
    import(dir.path(), &db_path, &[bad], StarCountsPolicy::Coerce);

    let conn = Connection::open(&db_path).unwrap();
    let (five, rating): (Option<i64>, Option<f64>) = conn
        .query_row(
            "SELECT five_stars, rating FROM ratings_and_bbe_scores WHERE book_id = 2767052",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(five, None);
    // The rest of the row survives
    assert_eq!(rating, Some(4.33));
}

// =============================================================================
// Re-running the import
// =============================================================================

#[test]
fn test_rerun_into_populated_database_fails_without_corrupting_it() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("books.db");
    import(
        dir.path(),
        &db_path,
        &[hunger_games_row()],
        StarCountsPolicy::Strict,
    );

    // A second run re-assigns idx from 1, so the batch collides with the
    // existing rows and must roll back as a whole
    let csv_path = write_fixture(dir.path(), &[hunger_games_row()]);
    let records = clean(load_books(&csv_path).unwrap());
    let dataset = transform(&records, StarCountsPolicy::Strict).unwrap();
    let store = SqliteBookStore::new(&db_path).unwrap();
    assert!(store.insert_books(&dataset.books).is_err());

    let conn = Connection::open(&db_path).unwrap();
    assert_eq!(query_i64(&conn, "SELECT COUNT(*) FROM books"), 1);
}
