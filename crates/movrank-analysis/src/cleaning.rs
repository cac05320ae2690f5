//! Dataset cleaning before aggregate statistics.
//!
//! Ranking works on the table as scraped. Aggregates work on a cleaned copy:
//! incomplete records are dropped, then repeated titles (first kept).

use std::collections::HashSet;

use movrank_engine::{MovieRecord, MovieTable, split::split_multi_valued};
use serde::Serialize;
use tracing::info;

/// What [`clean`] removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningSummary {
    pub input: usize,
    /// Records with an empty required field.
    pub incomplete: usize,
    /// Records whose title appeared earlier.
    pub duplicates: usize,
    pub kept: usize,
}

/// Drops incomplete records, then duplicate titles.
///
/// Order of the kept records is preserved.
#[must_use]
pub fn clean(table: &MovieTable) -> (MovieTable, CleaningSummary) {
    let mut summary = CleaningSummary {
        input: table.len(),
        ..CleaningSummary::default()
    };
    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    for record in table.iter() {
        if !record.is_complete() {
            summary.incomplete += 1;
        } else if !seen.insert(record.title.as_str()) {
            summary.duplicates += 1;
        } else {
            kept.push(record.clone());
        }
    }
    summary.kept = kept.len();

    info!(
        input = summary.input,
        incomplete = summary.incomplete,
        duplicates = summary.duplicates,
        kept = summary.kept,
        "dataset cleaned"
    );
    (MovieTable::from_records(kept), summary)
}

/// Release year of a `Year` cell.
///
/// Release dates look like `December 18, 1974 (United States)`; the digits
/// after the first comma are the year. A cell without a comma is read as a
/// bare year.
///
/// # Examples
///
/// ```
/// use movrank_analysis::cleaning::release_year;
///
/// assert_eq!(release_year("December 18, 1974 (United States)"), Some(1974));
/// assert_eq!(release_year("1994"), Some(1994));
/// assert_eq!(release_year("TBA"), None);
/// ```
#[must_use]
pub fn release_year(text: &str) -> Option<u16> {
    let tail = text.split_once(',').map_or(text, |(_, tail)| tail);
    let digits = tail
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    digits.parse().ok()
}

/// The first country of a camel-joined `Country` cell.
#[must_use]
pub fn primary_country(text: &str) -> Option<String> {
    split_multi_valued(text).into_iter().next()
}

/// Genres of a `Genre` cell, split on `" / "`.
pub fn genres(record: &MovieRecord) -> impl Iterator<Item = &str> {
    record
        .genre
        .split(" / ")
        .map(str::trim)
        .filter(|g| !g.is_empty())
}
