//! Statistical utilities for the movrank project.
//!
//! This crate provides the numeric building blocks used by the ranking
//! engine and the dataset analysis:
//!
//! - **Descriptive statistics**: min, max, mean, median, variance, standard deviation
//! - **Percentiles**: nearest-rank percentile lookup
//! - **Tertile thresholds**: `(medium, high)` cut points splitting a population in three
//! - **Ordinal rank**: 1-based position of a value in an ascending population
//! - **Frequency counting**: occurrence counts with "most common" ordering
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation and storage
//! - [`tertile`]: Tertile thresholds and three-way grading
//! - [`rank`]: Ordinal ranking within a sorted population
//! - [`frequency`]: Counting occurrences of categorical values
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use movrank_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Computing tertile thresholds
//!
//! ```
//! use movrank_stats::tertile::Thresholds;
//!
//! let budgets = [9000.0, 100.0, 20000.0, 500.0, 5000.0, 1000.0];
//! let thresholds = Thresholds::from_values(budgets).unwrap();
//! assert_eq!(thresholds.medium, 500.0);
//! assert_eq!(thresholds.high, 9000.0);
//! ```
//!
//! ## Ranking a value
//!
//! ```
//! use movrank_stats::rank::ordinal_rank;
//!
//! let mut population = vec![100.0, 500.0, 1000.0, 5000.0, 9000.0, 20000.0];
//! population.sort_by(f64::total_cmp);
//! assert_eq!(ordinal_rank(&population, &9000.0), 5);
//! ```

pub mod descriptive;
pub mod frequency;
pub mod percentiles;
pub mod rank;
pub mod tertile;
