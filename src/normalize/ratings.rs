//! Ratings and engagement detail table.
//!
//! `ratings_by_stars` arrives as a stringified 5-element list of counts,
//! 5-star first. Upstream data is assumed well-formed here; what happens
//! when it is not is an explicit policy choice.

use super::clean::BookRecord;
use crate::book_store::RatingsRow;
use clap::ValueEnum;
use thiserror::Error;

/// What to do when `ratings_by_stars` is missing or malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StarCountsPolicy {
    /// Treat it as a data-contract violation and fail the transformation.
    Strict,
    /// Degrade all five star columns to missing for that row.
    Coerce,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("book {book_id:?}: malformed ratings_by_stars value {raw:?}")]
pub struct StarCountsError {
    pub book_id: Option<i64>,
    pub raw: String,
}

/// Project the ratings/engagement columns and expand the star-count list
/// into five columns, 5-star down to 1-star.
pub fn transform_ratings(
    records: &[BookRecord],
    policy: StarCountsPolicy,
) -> Result<Vec<RatingsRow>, StarCountsError> {
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let stars = match record.ratings_by_stars.as_deref().and_then(parse_star_counts) {
            Some(counts) => counts.map(Some),
            None => match policy {
                StarCountsPolicy::Strict => {
                    return Err(StarCountsError {
                        book_id: record.book_id,
                        raw: record.ratings_by_stars.clone().unwrap_or_default(),
                    })
                }
                StarCountsPolicy::Coerce => [None; 5],
            },
        };
        rows.push(RatingsRow {
            index: record.index,
            book_id: record.book_id,
            rating: record.rating,
            num_ratings: record.num_ratings,
            five_stars: stars[0],
            four_stars: stars[1],
            three_stars: stars[2],
            two_stars: stars[3],
            one_star: stars[4],
            liked_percent: record.liked_percent,
            bbe_score: record.bbe_score,
            bbe_votes: record.bbe_votes,
        });
    }
    Ok(rows)
}

/// Parse `"[120, 80, 30, 10, 5]"` (items optionally quoted) into exactly
/// five counts.
fn parse_star_counts(raw: &str) -> Option<[i64; 5]> {
    let inner = raw.trim().strip_prefix('[')?.strip_suffix(']')?;
    let mut counts = [0i64; 5];
    let mut n = 0;
    for item in inner.split(',') {
        if n == 5 {
            return None;
        }
        let item = item.trim().trim_matches(|c| c == '\'' || c == '"');
        counts[n] = item.parse().ok()?;
        n += 1;
    }
    if n == 5 {
        Some(counts)
    } else {
        None
    }
}
