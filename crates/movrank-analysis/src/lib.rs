//! Dataset-level analysis of movie charts
//!
//! Where [`movrank_engine`] answers "where does this movie stand", this crate
//! summarizes the chart as a whole.
//!
//! # Workflow
//!
//! 1. **Clean** ([`cleaning::clean`]): drop incomplete records and repeated
//!    titles, keeping a [`cleaning::CleaningSummary`] of what was removed
//! 2. **Aggregate** ([`statistics::DatasetStatistics::compute`]): country,
//!    decade and genre distributions, runtime summary, and budget / gross
//!    statistics with tertile thresholds in USD
//!
//! # Examples
//!
//! ```
//! use movrank_analysis::statistics::{DatasetStatistics, StatisticsConfig};
//! use movrank_engine::{CurrencyTable, MovieRecord, MovieTable};
//!
//! let record = MovieRecord {
//!     title: "Seven Samurai".into(),
//!     year: "November 19, 1956 (United States)".into(),
//!     film_rating: "Not Rated".into(),
//!     runtime: Some(207),
//!     rating_numbers: "364K".into(),
//!     genre: "Action / Drama".into(),
//!     language: "Japanese".into(),
//!     budget: "¥125,000,000 (estimated)".into(),
//!     gross_worldwide: "$346,258".into(),
//!     country: "Japan".into(),
//!     ..MovieRecord::default()
//! };
//! let table = MovieTable::from_records(vec![record]);
//! let stats = DatasetStatistics::compute(
//!     &table,
//!     &CurrencyTable::default(),
//!     &StatisticsConfig::default(),
//! );
//!
//! assert_eq!(stats.decades[0].decade, 1950);
//! assert_eq!(stats.genres[0].genre, "Action");
//! ```

pub mod cleaning;
pub mod statistics;
