//! Books Dataset Normalizer Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod book_store;
pub mod dataset;
pub mod normalize;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use book_store::{BookStore, FacetKind, SqliteBookStore};
pub use dataset::{load_books, RawBookRow};
pub use normalize::{clean, transform, NormalizedDataset, StarCountsPolicy};
