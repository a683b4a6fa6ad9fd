//! Typed rows for the normalized book schema.
//!
//! One struct per table family. All rows are immutable snapshots produced by
//! the normalization pipeline and consumed by the store.

use chrono::NaiveDate;

/// The five multi-valued book attributes that get their own dimension and
/// bridge table pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetKind {
    Author,
    Award,
    Character,
    Genre,
    Setting,
}

impl FacetKind {
    /// All facets, in the order their tables are emitted to the store.
    pub const ALL: [FacetKind; 5] = [
        FacetKind::Author,
        FacetKind::Award,
        FacetKind::Character,
        FacetKind::Genre,
        FacetKind::Setting,
    ];

    pub fn dimension_table(&self) -> &'static str {
        match self {
            FacetKind::Author => "authors",
            FacetKind::Award => "awards",
            FacetKind::Character => "characters",
            FacetKind::Genre => "genres",
            FacetKind::Setting => "settings",
        }
    }

    pub fn bridge_table(&self) -> &'static str {
        match self {
            FacetKind::Author => "authors_books_bridge",
            FacetKind::Award => "awards_books_bridge",
            FacetKind::Character => "characters_books_bridge",
            FacetKind::Genre => "genres_books_bridge",
            FacetKind::Setting => "settings_books_bridge",
        }
    }

    /// Surrogate key column, used both in the dimension and in the bridge.
    pub fn id_column(&self) -> &'static str {
        match self {
            FacetKind::Author => "author_id",
            FacetKind::Award => "award_id",
            FacetKind::Character => "character_id",
            FacetKind::Genre => "genre_id",
            FacetKind::Setting => "setting_id",
        }
    }

    pub fn value_column(&self) -> &'static str {
        match self {
            FacetKind::Author => "author",
            FacetKind::Award => "award",
            FacetKind::Character => "character",
            FacetKind::Genre => "genre",
            FacetKind::Setting => "setting",
        }
    }
}

/// A row of the slimmed `books` table, after the facet and detail columns
/// have been relocated to their own tables.
#[derive(Debug, Clone, PartialEq)]
pub struct BookRow {
    pub index: i64,
    pub book_id: Option<i64>,
    pub title: Option<String>,
    pub series: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub isbn: Option<String>,
    pub book_format: Option<String>,
    pub edition: Option<String>,
    pub pages: Option<i64>,
    pub cover_img: Option<String>,
    pub price: Option<f64>,
}

/// A row of a facet dimension table: surrogate key plus unique value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionRow {
    pub id: i64,
    pub value: String,
}

/// A row of a facet bridge table, associating one book with one facet value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeRow {
    pub index: i64,
    pub book_id: Option<i64>,
    pub facet_id: i64,
}

/// A row of `ratings_and_bbe_scores`, one per book.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingsRow {
    pub index: i64,
    pub book_id: Option<i64>,
    pub rating: Option<f64>,
    pub num_ratings: Option<i64>,
    pub five_stars: Option<i64>,
    pub four_stars: Option<i64>,
    pub three_stars: Option<i64>,
    pub two_stars: Option<i64>,
    pub one_star: Option<i64>,
    pub liked_percent: Option<f64>,
    pub bbe_score: Option<f64>,
    pub bbe_votes: Option<i64>,
}

/// A row of `publication_info`, one per book. Dates are calendar-date
/// precision, already stripped of any time component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationRow {
    pub index: i64,
    pub book_id: Option<i64>,
    pub publisher: Option<String>,
    pub publish_date: Option<NaiveDate>,
    pub first_publish_date: Option<NaiveDate>,
}
