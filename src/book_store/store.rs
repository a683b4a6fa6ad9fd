//! SQLite-backed implementation of the [`BookStore`] sink.

use super::models::*;
use super::schema::BOOKS_SCHEMA;
use super::BookStore;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// SQLite store for the normalized books schema.
///
/// Opening a fresh database file creates all thirteen tables; opening an
/// existing one validates it against the declared schema and refuses to
/// proceed on mismatch. Each insert batch runs in its own transaction.
pub struct SqliteBookStore {
    conn: Mutex<Connection>,
}

fn create_or_validate(conn: &Connection) -> Result<()> {
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
            [],
            |r| r.get(0),
        )
        .unwrap_or(0);

    if table_count == 0 {
        info!("Creating books db schema");
        BOOKS_SCHEMA.create(conn)?;
    } else {
        BOOKS_SCHEMA
            .validate(conn)
            .context("Existing database does not match the books schema")?;
    }
    Ok(())
}

fn date_to_sql(date: &Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

impl SqliteBookStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open_with_flags(
            db_path.as_ref(),
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .context("Failed to open books database")?;

        conn.execute("PRAGMA foreign_keys = ON;", params![])?;
        create_or_validate(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl BookStore for SqliteBookStore {
    fn insert_books(&self, rows: &[BookRow]) -> Result<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO books (idx, book_id, title, series, description, language, isbn,
                                    book_format, edition, pages, cover_img, price)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.index,
                    row.book_id,
                    row.title,
                    row.series,
                    row.description,
                    row.language,
                    row.isbn,
                    row.book_format,
                    row.edition,
                    row.pages,
                    row.cover_img,
                    row.price,
                ])?;
            }
        }
        tx.commit()?;
        Ok(rows.len())
    }

    fn insert_dimension(&self, kind: FacetKind, rows: &[DimensionRow]) -> Result<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {} ({}, {}) VALUES (?1, ?2)",
                kind.dimension_table(),
                kind.id_column(),
                kind.value_column()
            ))?;
            for row in rows {
                stmt.execute(params![row.id, row.value])?;
            }
        }
        tx.commit()?;
        Ok(rows.len())
    }

    fn insert_bridge(&self, kind: FacetKind, rows: &[BridgeRow]) -> Result<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {} (idx, book_id, {}) VALUES (?1, ?2, ?3)",
                kind.bridge_table(),
                kind.id_column()
            ))?;
            for row in rows {
                stmt.execute(params![row.index, row.book_id, row.facet_id])?;
            }
        }
        tx.commit()?;
        Ok(rows.len())
    }

    fn insert_publication_info(&self, rows: &[PublicationRow]) -> Result<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO publication_info (idx, book_id, publisher, publish_date, first_publish_date)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.index,
                    row.book_id,
                    row.publisher,
                    date_to_sql(&row.publish_date),
                    date_to_sql(&row.first_publish_date),
                ])?;
            }
        }
        tx.commit()?;
        Ok(rows.len())
    }

    fn insert_ratings(&self, rows: &[RatingsRow]) -> Result<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO ratings_and_bbe_scores
                   (idx, book_id, rating, num_ratings, five_stars, four_stars, three_stars,
                    two_stars, one_star, liked_percent, bbe_score, bbe_votes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.index,
                    row.book_id,
                    row.rating,
                    row.num_ratings,
                    row.five_stars,
                    row.four_stars,
                    row.three_stars,
                    row.two_stars,
                    row.one_star,
                    row.liked_percent,
                    row.bbe_score,
                    row.bbe_votes,
                ])?;
            }
        }
        tx.commit()?;
        Ok(rows.len())
    }

    fn table_counts(&self) -> Result<Vec<(&'static str, i64)>> {
        let conn = self.conn.lock().unwrap();
        let mut counts = Vec::with_capacity(BOOKS_SCHEMA.tables.len());
        for table in BOOKS_SCHEMA.tables {
            let count: i64 =
                conn.query_row(&format!("SELECT COUNT(*) FROM {}", table.name), [], |r| {
                    r.get(0)
                })?;
            counts.push((table.name, count));
        }
        Ok(counts)
    }
}
