//! CSV loading for the books dataset.

use super::{RawBookRow, COLUMN_COUNT};
use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Load the source file into raw rows.
///
/// The file is expected to carry exactly [`COLUMN_COUNT`] columns in the
/// canonical order; its header row is consumed and ignored. Fields are
/// decoded lossily because the source data is known to contain mojibake
/// sequences that are not valid UTF-8 in every dump.
pub fn load_books<P: AsRef<Path>>(path: P) -> Result<Vec<RawBookRow>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open dataset {}", path.display()))?;
    // Flexible so the explicit column-count check below owns the error message
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for (row_number, record_result) in reader.byte_records().enumerate() {
        let record = record_result
            .with_context(|| format!("Failed to read row {} of {}", row_number + 1, path.display()))?;
        if record.len() != COLUMN_COUNT {
            bail!(
                "Row {} of {} has {} columns, expected {}",
                row_number + 1,
                path.display(),
                record.len(),
                COLUMN_COUNT
            );
        }

        let field = |i: usize| -> Option<String> {
            let text = String::from_utf8_lossy(&record[i]);
            if text.is_empty() {
                None
            } else {
                Some(text.into_owned())
            }
        };

        rows.push(RawBookRow {
            book_id: field(0),
            title: field(1),
            series: field(2),
            author: field(3),
            rating: field(4),
            description: field(5),
            language: field(6),
            isbn: field(7),
            genres: field(8),
            characters: field(9),
            book_format: field(10),
            edition: field(11),
            pages: field(12),
            publisher: field(13),
            publish_date: field(14),
            first_publish_date: field(15),
            awards: field(16),
            num_ratings: field(17),
            ratings_by_stars: field(18),
            liked_percent: field(19),
            setting: field(20),
            cover_img: field(21),
            bbe_score: field(22),
            bbe_votes: field(23),
            price: field(24),
        });
    }

    info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
