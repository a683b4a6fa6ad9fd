//! Generic facet extraction.
//!
//! One code path serves all five facets. A facet column is split into
//! tokens by its per-facet rule, each (book, token) pair becomes a bridge
//! row, and tokens are deduplicated into a dimension table whose surrogate
//! keys follow first-seen order starting at 1. Keys are stable within a
//! run only.

use super::clean::BookRecord;
use crate::book_store::{BridgeRow, DimensionRow, FacetKind};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    // Leftovers of a stringified list representation
    static ref LIST_PUNCTUATION_RE: Regex =
        Regex::new(r"[\[\]']").expect("Invalid regex, this should be fixed at compile time.");
    // A capitalized place-name-like token with a parenthesized qualifier,
    // anchored at the text following a candidate comma
    static ref PLACE_AHEAD_RE: Regex =
        Regex::new(r"^[A-Z][a-z]*(?:\s[A-Z][a-z]*)*\s\([A-Za-z\s]*\)")
            .expect("Invalid regex, this should be fixed at compile time.");
}

/// The dimension and bridge tables produced for one facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetTables {
    pub kind: FacetKind,
    pub dimension: Vec<DimensionRow>,
    pub bridge: Vec<BridgeRow>,
}

/// Explode one facet column of the cleaned table into a dimension and a
/// bridge. Missing cells and empty tokens contribute no rows; a book with
/// K tokens contributes exactly K bridge rows (tokens are not deduplicated
/// within a single book, only globally in the dimension).
pub fn extract(kind: FacetKind, records: &[BookRecord]) -> FacetTables {
    let mut dimension: Vec<DimensionRow> = Vec::new();
    let mut id_by_value: HashMap<String, i64> = HashMap::new();
    let mut bridge: Vec<BridgeRow> = Vec::new();

    for record in records {
        let Some(raw) = facet_cell(kind, record) else {
            continue;
        };
        for token in split_tokens(kind, raw) {
            let facet_id = match id_by_value.get(&token) {
                Some(&id) => id,
                None => {
                    let id = (dimension.len() + 1) as i64;
                    id_by_value.insert(token.clone(), id);
                    dimension.push(DimensionRow { id, value: token });
                    id
                }
            };
            bridge.push(BridgeRow {
                index: (bridge.len() + 1) as i64,
                book_id: record.book_id,
                facet_id,
            });
        }
    }

    FacetTables {
        kind,
        dimension,
        bridge,
    }
}

fn facet_cell<'a>(kind: FacetKind, record: &'a BookRecord) -> Option<&'a str> {
    match kind {
        FacetKind::Author => record.author.as_deref(),
        FacetKind::Award => record.awards.as_deref(),
        FacetKind::Character => record.characters.as_deref(),
        FacetKind::Genre => record.genres.as_deref(),
        FacetKind::Setting => record.setting.as_deref(),
    }
}

fn split_tokens(kind: FacetKind, raw: &str) -> Vec<String> {
    let parts: Vec<String> = match kind {
        // The parenthesis-comma rewrite already happened during cleaning
        FacetKind::Author => raw.split(", ").map(str::to_string).collect(),
        FacetKind::Award | FacetKind::Character | FacetKind::Genre => {
            strip_list_punctuation(raw).split(", ").map(str::to_string).collect()
        }
        FacetKind::Setting => split_settings(&strip_list_punctuation(raw)),
    };
    parts
        .into_iter()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

fn strip_list_punctuation(raw: &str) -> String {
    LIST_PUNCTUATION_RE.replace_all(raw, "").into_owned()
}

/// Split a settings cell on commas that start a new place entry.
///
/// A comma is a separator only when the text after it reads like a
/// capitalized place name with a parenthesized qualifier, e.g. the comma
/// before "London (England)" in "Paris (France), London (England)". Commas
/// inside a qualifier never match. This is a best-effort heuristic carried
/// over from the source data conventions; locales that do not follow
/// English capitalization may not split correctly.
fn split_settings(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (offset, ch) in text.char_indices() {
        if ch != ',' || offset < start {
            continue;
        }
        let rest = &text[offset + 1..];
        let lookahead = rest.trim_start();
        if PLACE_AHEAD_RE.is_match(lookahead) {
            parts.push(text[start..offset].to_string());
            start = offset + 1 + (rest.len() - lookahead.len());
        }
    }
    parts.push(text[start..].to_string());
    parts
}
