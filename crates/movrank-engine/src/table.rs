//! Raw and validated movie tables.
//!
//! A [`RawTable`] is whatever a loader produced: a header row plus string
//! rows. [`MovieTable::from_raw`] checks the headers against the required
//! [`Column`]s and builds typed [`MovieRecord`]s. Field-level problems do not
//! fail the table; they are collected as [`ParseIssue`]s.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    RankError, SchemaError,
    record::{Column, MovieRecord},
};

/// Headers and rows as produced by a loader.
///
/// Rows shorter than the header are padded with empty cells when read.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn cell(&self, row: usize, col: Option<usize>) -> &str {
        col.and_then(|c| self.rows[row].get(c))
            .map_or("", String::as_str)
    }
}

/// Why a field could not be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum ParseIssueKind {
    #[display("no number found")]
    MissingNumber,
    #[display("not a valid number")]
    InvalidNumber,
    #[display("unknown currency")]
    UnknownCurrency,
    #[display("unknown unit suffix")]
    UnknownUnit,
    #[display("currency rate is not a finite number")]
    InvalidRate,
}

/// A field whose text did not match the expected pattern.
#[derive(Debug, Clone, PartialEq, Serialize, derive_more::Display)]
#[display("row {row}, {:?}: {kind} in {text:?}", column.header())]
pub struct ParseIssue {
    /// Zero-based record index.
    pub row: usize,
    pub column: Column,
    pub kind: ParseIssueKind,
    pub text: String,
}

/// Parse issues collected while reading or ranking a table.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ParseDiagnostics {
    issues: Vec<ParseIssue>,
}

impl ParseDiagnostics {
    pub fn push(&mut self, issue: ParseIssue) {
        debug!(%issue, "field degraded");
        self.issues.push(issue);
    }

    pub fn extend<I>(&mut self, issues: I)
    where
        I: IntoIterator<Item = ParseIssue>,
    {
        for issue in issues {
            self.push(issue);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParseIssue> {
        self.issues.iter()
    }

    /// Issue counts per column.
    #[must_use]
    pub fn count_by_column(&self) -> BTreeMap<Column, usize> {
        let mut counts = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry(issue.column).or_insert(0) += 1;
        }
        counts
    }
}

/// Validated, immutable movie records in chart order.
#[derive(Debug, Clone, Default)]
pub struct MovieTable {
    records: Vec<MovieRecord>,
    diagnostics: ParseDiagnostics,
}

impl MovieTable {
    /// Builds a table from already typed records.
    #[must_use]
    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        Self {
            records,
            diagnostics: ParseDiagnostics::default(),
        }
    }

    /// Validates the headers of `raw` and reads its rows.
    ///
    /// Every missing required column is reported in one
    /// [`RankError::Schema`]. Text cells are kept as scraped,
    /// whitespace included. Unreadable `Time` and `Score` cells become `None`
    /// and are recorded in [`Self::diagnostics`].
    pub fn from_raw(raw: &RawTable) -> Result<Self, RankError> {
        let positions = Column::ALL.map(|column| {
            raw.headers
                .iter()
                .position(|h| Column::from_header(h) == Some(column))
        });

        let missing = Column::ALL
            .into_iter()
            .zip(&positions)
            .filter(|(column, pos)| column.is_required() && pos.is_none())
            .map(|(column, _)| column)
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns(missing).into());
        }

        let pos = |column: Column| positions[column as usize];
        let mut diagnostics = ParseDiagnostics::default();
        let records = (0..raw.len())
            .map(|row| {
                let text = |column: Column| raw.cell(row, pos(column)).to_owned();
                let runtime = read_number(raw, row, pos(Column::Time), Column::Time, &mut diagnostics);
                let score = read_number(raw, row, pos(Column::Score), Column::Score, &mut diagnostics);
                MovieRecord {
                    title: text(Column::Title),
                    year: text(Column::Year),
                    film_rating: text(Column::FilmRating),
                    runtime,
                    score,
                    rating_numbers: text(Column::RatingNumbers),
                    genre: text(Column::Genre),
                    language: text(Column::Language),
                    keywords: pos(Column::Keywords).map(|_| text(Column::Keywords)),
                    budget: text(Column::Budget),
                    gross_worldwide: text(Column::GrossWorldwide),
                    country: text(Column::Country),
                }
            })
            .collect::<Vec<_>>();

        info!(
            records = records.len(),
            issues = diagnostics.len(),
            "movie table loaded"
        );
        Ok(Self {
            records,
            diagnostics,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovieRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &ParseDiagnostics {
        &self.diagnostics
    }

    /// Index of the first record titled exactly `title`.
    ///
    /// An empty title never matches.
    pub fn position(&self, title: &str) -> Result<usize, RankError> {
        self.records
            .iter()
            .position(|r| !title.is_empty() && r.title == title)
            .ok_or_else(|| RankError::NotFound {
                title: title.to_owned(),
            })
    }
}

/// Reads an optional numeric cell; blank means absent.
fn read_number<T>(
    raw: &RawTable,
    row: usize,
    col: Option<usize>,
    column: Column,
    diagnostics: &mut ParseDiagnostics,
) -> Option<T>
where
    T: std::str::FromStr,
{
    let cell = raw.cell(row, col).trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse().ok().or_else(|| {
        diagnostics.push(ParseIssue {
            row,
            column,
            kind: ParseIssueKind::InvalidNumber,
            text: cell.to_owned(),
        });
        None
    })
}
