//! Publication detail table.
//!
//! The two date columns carry a mix of formats. Parsing tries a fixed
//! ladder of the four formats known to dominate the data, then a wider set
//! of lenient fallbacks; anything still unparsed becomes missing, never an
//! error.

use super::clean::BookRecord;
use crate::book_store::PublicationRow;
use chrono::NaiveDate;

/// Primary formats, tried in order: "March 3 2020", "03/04/20",
/// "2020-03-03", "March 3, 2020".
const DATE_FORMATS: [&str; 4] = ["%B %d %Y", "%m/%d/%y", "%Y-%m-%d", "%B %d, %Y"];

/// Lenient fallbacks for stragglers: abbreviated months, day-first, and
/// four-digit-year slashed forms.
const FALLBACK_FORMATS: [&str; 5] = ["%b %d %Y", "%b %d, %Y", "%d %B %Y", "%m/%d/%Y", "%d/%m/%y"];

/// Formats for month-year inputs after padding with a day of 1, full and
/// abbreviated month names. Year-only values are handled separately.
const MONTH_YEAR_FORMATS: [&str; 2] = ["%d %B %Y", "%d %b %Y"];

pub fn transform_publication_info(records: &[BookRecord]) -> Vec<PublicationRow> {
    records
        .iter()
        .map(|record| PublicationRow {
            index: record.index,
            book_id: record.book_id,
            publisher: record.publisher.clone(),
            publish_date: record.publish_date.as_deref().and_then(parse_publish_date),
            first_publish_date: record
                .first_publish_date
                .as_deref()
                .and_then(parse_publish_date),
        })
        .collect()
}

/// Parse a raw date cell to calendar-date precision, or nothing.
pub fn parse_publish_date(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    // Month-year inputs must not reach the ladder: chrono treats a format
    // space as any whitespace run, so "%B %d %Y" would read "March 2020"
    // as month March, day 20, year 20.
    if let Some(date) = parse_month_year(text) {
        return Some(date);
    }
    for format in DATE_FORMATS.iter().chain(FALLBACK_FORMATS.iter()) {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    // "2020" -> first day of the year
    if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(year) = text.parse::<i32>() {
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }
    }
    None
}

/// "March 2020" or "Mar 2020" -> first of the month.
fn parse_month_year(text: &str) -> Option<NaiveDate> {
    let mut tokens = text.split_whitespace();
    let month = tokens.next()?;
    let year = tokens.next()?;
    if tokens.next().is_some()
        || !month.chars().all(|c| c.is_ascii_alphabetic())
        || year.len() != 4
        || !year.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let padded = format!("1 {} {}", month, year);
    MONTH_YEAR_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&padded, format).ok())
}
