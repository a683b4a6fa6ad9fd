//! The normalization pipeline: cleaned base table in, all thirteen output
//! tables out.

use super::clean::BookRecord;
use super::facets::{extract, FacetTables};
use super::publication::transform_publication_info;
use super::ratings::{transform_ratings, StarCountsError, StarCountsPolicy};
use crate::book_store::{BookRow, FacetKind, PublicationRow, RatingsRow};

/// Every table produced by one pipeline run, in no particular order; the
/// emit plan in the binary decides what reaches the store first.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDataset {
    pub books: Vec<BookRow>,
    pub facets: Vec<FacetTables>,
    pub publication_info: Vec<PublicationRow>,
    pub ratings_and_bbe_scores: Vec<RatingsRow>,
}

/// Run every facet extraction and detail transform over the cleaned table,
/// then prune the relocated columns into the final `books` projection.
pub fn transform(
    records: &[BookRecord],
    star_counts_policy: StarCountsPolicy,
) -> Result<NormalizedDataset, StarCountsError> {
    let facets = FacetKind::ALL
        .iter()
        .map(|&kind| extract(kind, records))
        .collect();
    let publication_info = transform_publication_info(records);
    let ratings_and_bbe_scores = transform_ratings(records, star_counts_policy)?;
    let books = prune_books(records);

    Ok(NormalizedDataset {
        books,
        facets,
        publication_info,
        ratings_and_bbe_scores,
    })
}

/// The column pruner: project each cleaned record onto the columns that
/// were not relocated into a facet or detail table.
fn prune_books(records: &[BookRecord]) -> Vec<BookRow> {
    records
        .iter()
        .map(|record| BookRow {
            index: record.index,
            book_id: record.book_id,
            title: record.title.clone(),
            series: record.series.clone(),
            description: record.description.clone(),
            language: record.language.clone(),
            isbn: record.isbn.clone(),
            book_format: record.book_format.clone(),
            edition: record.edition.clone(),
            pages: record.pages,
            cover_img: record.cover_img.clone(),
            price: record.price,
        })
        .collect()
}
