//! Raw tabular input, before any cleaning.

mod load;

pub use load::load_books;

/// Number of columns the source file must carry, in the canonical order of
/// [`RawBookRow`]. Whatever headers the file declares are ignored.
pub const COLUMN_COUNT: usize = 25;

/// One row of the source file, renamed to the canonical column set.
/// Every field is raw text; empty cells are missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBookRow {
    pub book_id: Option<String>,
    pub title: Option<String>,
    pub series: Option<String>,
    pub author: Option<String>,
    pub rating: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub isbn: Option<String>,
    pub genres: Option<String>,
    pub characters: Option<String>,
    pub book_format: Option<String>,
    pub edition: Option<String>,
    pub pages: Option<String>,
    pub publisher: Option<String>,
    pub publish_date: Option<String>,
    pub first_publish_date: Option<String>,
    pub awards: Option<String>,
    pub num_ratings: Option<String>,
    pub ratings_by_stars: Option<String>,
    pub liked_percent: Option<String>,
    pub setting: Option<String>,
    pub cover_img: Option<String>,
    pub bbe_score: Option<String>,
    pub bbe_votes: Option<String>,
    pub price: Option<String>,
}
