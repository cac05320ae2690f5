//! Ranking engine for scraped movie charts.
//!
//! Given a [`MovieTable`] and a target title, the [`RankingEngine`] computes
//! where the movie stands in the chart along several axes:
//!
//! - monetary values (budget, worldwide gross) normalized to USD through a
//!   [`CurrencyTable`], graded against tertile thresholds and ranked in the
//!   full and same-genre populations
//! - ordinal ranks of single-valued features (film rating, vote count)
//! - membership ranks of multi-valued features (country, language), split
//!   with [`split::split_multi_valued`]
//!
//! The result is a plain [`MovieRanking`] that [`report::ReportText`] turns
//! into a narrative.
//!
//! ```
//! use movrank_engine::{CurrencyTable, MovieTable, RankingEngine, RawTable};
//!
//! let mut raw = RawTable::new([
//!     "Title", "Year", "Film rating", "Time", "Rating Numbers", "Genre",
//!     "Language", "Budget", "Gross worldwide", "Country",
//! ]);
//! for (title, budget, gross) in [
//!     ("A", "$100", "$1,000"),
//!     ("B", "$200", "$2,000"),
//!     ("C", "$300", "$3,000"),
//! ] {
//!     raw.push_row([
//!         title, "1999", "R", "120", "10K", "Drama", "English",
//!         budget, gross, "United States",
//!     ]);
//! }
//!
//! let table = MovieTable::from_raw(&raw)?;
//! let currencies = CurrencyTable::default();
//! let engine = RankingEngine::new(&table, &currencies);
//! let ranking = engine.query("B")?;
//! assert_eq!(ranking.budget.rank, 2);
//! # Ok::<(), movrank_engine::RankError>(())
//! ```

pub use self::{
    currency::{Amount, CurrencyTable, MoneyColumn, MoneyPopulation},
    ranking::{MovieRanking, RankingEngine},
    record::{Column, MovieRecord},
    table::{MovieTable, ParseDiagnostics, ParseIssue, ParseIssueKind, RawTable},
};
pub use movrank_stats::tertile::{Grade, InsufficientDataError, Thresholds};

pub mod currency;
pub mod ranking;
pub mod record;
pub mod report;
pub mod split;
pub mod table;
pub mod votes;

/// Errors that abort a ranking query.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum RankError {
    #[display("{_0}")]
    Schema(SchemaError),
    #[display("movie not found: {title:?}")]
    #[from(skip)]
    NotFound { title: String },
    #[display("{_0}")]
    InsufficientData(InsufficientDataError),
}

/// The input table does not have the shape the engine expects.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SchemaError {
    #[display("missing required column(s): {}", record::join_headers(_0))]
    MissingColumns(#[error(not(source))] Vec<Column>),
}
