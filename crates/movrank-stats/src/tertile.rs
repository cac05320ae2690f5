//! Tertile thresholds and three-way grading.
//!
//! A population is split into three equal-sized groups by two cut points.
//! With `m = floor(n / 3)` over the ascending-sorted population, the cut
//! points are the values at index `m - 1` (medium) and `2 * m` (high).
//!
//! ```
//! use movrank_stats::tertile::{Grade, Thresholds};
//!
//! let thresholds = Thresholds::from_values([100.0, 500.0, 1000.0, 5000.0, 9000.0, 20000.0]).unwrap();
//! assert_eq!(thresholds.grade(400.0), Grade::Low);
//! assert_eq!(thresholds.grade(500.0), Grade::Mid);
//! assert_eq!(thresholds.grade(9000.0), Grade::High);
//! ```

use serde::Serialize;

/// Smallest population for which tertile thresholds are defined.
pub const MIN_TERTILE_POPULATION: usize = 3;

/// Returned when a population is too small to split into tertiles.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("at least {required} values are required for tertile thresholds, got {actual}")]
pub struct InsufficientDataError {
    pub required: usize,
    pub actual: usize,
}

/// The `(medium, high)` cut points of a population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    /// Values at or above this are at least [`Grade::Mid`].
    pub medium: f64,
    /// Values at or above this are [`Grade::High`].
    pub high: f64,
}

impl Thresholds {
    /// Computes thresholds from unsorted values.
    pub fn from_values<I>(values: I) -> Result<Self, InsufficientDataError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes thresholds from values sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    pub fn from_sorted(sorted_values: &[f64]) -> Result<Self, InsufficientDataError> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let n = sorted_values.len();
        if n < MIN_TERTILE_POPULATION {
            return Err(InsufficientDataError {
                required: MIN_TERTILE_POPULATION,
                actual: n,
            });
        }

        let medium = n / 3;
        let high = 2 * medium;
        Ok(Self {
            medium: sorted_values[medium - 1],
            high: sorted_values[high],
        })
    }

    /// Classifies `value` into one of the three buckets.
    #[must_use]
    pub fn grade(&self, value: f64) -> Grade {
        if value >= self.high {
            Grade::High
        } else if value >= self.medium {
            Grade::Mid
        } else {
            Grade::Low
        }
    }
}

/// Bucket assigned to a value relative to its population's thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    #[display("low")]
    Low,
    #[display("mid")]
    Mid,
    #[display("high")]
    High,
}
