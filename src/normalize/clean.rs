//! Field cleaning for the raw books table.
//!
//! Every coercion here degrades to a missing value, this step never fails
//! and never drops a row for a parse error. The only rows removed are
//! duplicates of an already-seen `book_id`.

use crate::dataset::RawBookRow;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    // Innermost parenthesized groups only, matching is non-overlapping
    static ref PARENS_RE: Regex =
        Regex::new(r"\([^()]+\)").expect("Invalid regex, this should be fixed at compile time.");
}

/// The trailing "and more" marker of truncated author lists. The second
/// spelling is the mojibake form the source data actually carries.
const AUTHOR_MORE_SUFFIXES: [&str; 2] = [", more\u{2026}", ", moreâ\u{20ac}¦"];

/// One cleaned row of the base table. Facet and detail columns are still
/// present, they are consumed by the extractors and dropped from the final
/// `books` projection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookRecord {
    pub index: i64,
    pub book_id: Option<i64>,
    pub title: Option<String>,
    pub series: Option<String>,
    pub author: Option<String>,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub isbn: Option<String>,
    pub genres: Option<String>,
    pub characters: Option<String>,
    pub book_format: Option<String>,
    pub edition: Option<String>,
    pub pages: Option<i64>,
    pub publisher: Option<String>,
    pub publish_date: Option<String>,
    pub first_publish_date: Option<String>,
    pub awards: Option<String>,
    pub num_ratings: Option<i64>,
    pub ratings_by_stars: Option<String>,
    pub liked_percent: Option<f64>,
    pub setting: Option<String>,
    pub cover_img: Option<String>,
    pub bbe_score: Option<f64>,
    pub bbe_votes: Option<i64>,
    pub price: Option<f64>,
}

/// Clean the raw table: coerce types, repair the author field, drop
/// duplicate `book_id` rows keeping the first occurrence, sort ascending by
/// `book_id` with missing ids last, and re-index densely from 1.
pub fn clean(rows: Vec<RawBookRow>) -> Vec<BookRecord> {
    let mut records: Vec<BookRecord> = rows.into_iter().map(clean_row).collect();

    // Keep-first dedup happens in original file order, before sorting
    let mut seen: HashSet<Option<i64>> = HashSet::new();
    records.retain(|record| seen.insert(record.book_id));

    records.sort_by_key(|record| (record.book_id.is_none(), record.book_id));

    for (position, record) in records.iter_mut().enumerate() {
        record.index = (position + 1) as i64;
    }
    records
}

fn clean_row(row: RawBookRow) -> BookRecord {
    BookRecord {
        index: 0,
        book_id: row.book_id.as_deref().and_then(parse_book_id),
        title: row.title,
        series: row.series,
        author: row.author.as_deref().map(clean_author),
        rating: row.rating.as_deref().and_then(parse_float),
        description: row.description,
        language: row.language,
        isbn: row.isbn,
        genres: row.genres,
        characters: row.characters,
        book_format: row.book_format,
        edition: row.edition,
        pages: row.pages.as_deref().and_then(parse_pages),
        publisher: row.publisher,
        publish_date: row.publish_date,
        first_publish_date: row.first_publish_date,
        awards: row.awards,
        num_ratings: row.num_ratings.as_deref().and_then(parse_int),
        ratings_by_stars: row.ratings_by_stars,
        liked_percent: row.liked_percent.as_deref().and_then(parse_float),
        setting: row.setting,
        cover_img: row.cover_img,
        bbe_score: row.bbe_score.as_deref().and_then(parse_float),
        bbe_votes: row.bbe_votes.as_deref().and_then(parse_int),
        price: row.price.as_deref().and_then(parse_float),
    }
}

/// Parse a possibly composite id token, e.g. `"2767052-the-hunger-games"`
/// or `"12345.Some_Title"`: only the part before the first hyphen or period
/// counts. Anything non-numeric becomes missing.
fn parse_book_id(raw: &str) -> Option<i64> {
    let head = raw.split('-').next().unwrap_or(raw);
    let head = head.split('.').next().unwrap_or(head);
    head.trim().parse().ok()
}

/// Repair the raw author list: strip the trailing "and more" artifact and
/// replace commas inside parenthesized groups with semicolons so that the
/// later `", "` split keeps a grouped role list attached to its author.
fn clean_author(raw: &str) -> String {
    let mut author = raw.to_string();
    for suffix in AUTHOR_MORE_SUFFIXES {
        if let Some(stripped) = author.strip_suffix(suffix) {
            author = stripped.to_string();
            break;
        }
    }
    PARENS_RE
        .replace_all(&author, |captures: &regex::Captures<'_>| {
            captures[0].replace(',', ";")
        })
        .into_owned()
}

/// Strip the trailing unit word before parsing, `"320 pages"` -> 320.
fn parse_pages(raw: &str) -> Option<i64> {
    let text = raw.trim();
    let text = text
        .strip_suffix(" pages")
        .or_else(|| text.strip_suffix(" page"))
        .unwrap_or(text);
    text.trim().parse().ok()
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse().ok()
}
