mod models;
mod schema;
mod store;

pub use models::{BookRow, BridgeRow, DimensionRow, FacetKind, PublicationRow, RatingsRow};
pub use schema::BOOKS_SCHEMA;
pub use store::SqliteBookStore;

use anyhow::Result;

/// The relational sink for the normalization pipeline.
///
/// Append semantics throughout: every call adds a batch of rows to one
/// table and reports success or failure for that table only. Implementors
/// must make each batch atomic, but no guarantee spans tables.
pub trait BookStore: Send + Sync {
    /// Append rows to the `books` table. Returns the number of rows written.
    fn insert_books(&self, rows: &[BookRow]) -> Result<usize>;

    /// Append rows to a facet dimension table.
    fn insert_dimension(&self, kind: FacetKind, rows: &[DimensionRow]) -> Result<usize>;

    /// Append rows to a facet bridge table.
    fn insert_bridge(&self, kind: FacetKind, rows: &[BridgeRow]) -> Result<usize>;

    /// Append rows to `publication_info`.
    fn insert_publication_info(&self, rows: &[PublicationRow]) -> Result<usize>;

    /// Append rows to `ratings_and_bbe_scores`.
    fn insert_ratings(&self, rows: &[RatingsRow]) -> Result<usize>;

    /// Row count per table, for the import summary.
    fn table_counts(&self) -> Result<Vec<(&'static str, i64)>>;
}
