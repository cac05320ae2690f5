//! Nearest-rank percentiles.

use serde::Serialize;

/// One requested percentile and its value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentilePoint {
    /// Percentile in `0.0..=100.0`.
    pub point: f64,
    pub value: f64,
}

/// Values at a fixed set of percentile points, in request order.
///
/// # Examples
///
/// ```
/// use movrank_stats::percentiles::Percentiles;
///
/// let runtimes = [142.0, 175.0, 152.0, 202.0, 96.0, 195.0, 154.0, 201.0, 178.0, 161.0];
/// let percentiles = Percentiles::new(&runtimes, &[25.0, 50.0, 75.0]);
///
/// assert_eq!(percentiles.get(25.0), Some(152.0));
/// assert_eq!(percentiles.get(50.0), Some(175.0));
/// assert_eq!(percentiles.get(75.0), Some(195.0));
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Percentiles {
    points: Vec<PercentilePoint>,
}

impl Percentiles {
    /// Sorts `values` and evaluates each of `points`.
    #[must_use]
    pub fn new(values: &[f64], points: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, points)
    }

    /// Like [`Percentiles::new`] for values already in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], points: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        Self {
            points: points
                .iter()
                .map(|&point| PercentilePoint {
                    point,
                    value: compute_percentile(sorted_values, point),
                })
                .collect(),
        }
    }

    /// Value at `point`, if it was one of the requested points.
    #[must_use]
    pub fn get(&self, point: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|p| (p.point - point).abs() < f64::EPSILON)
            .map(|p| p.value)
    }

    /// `(point, value)` pairs in request order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().map(|p| (p.point, p.value))
    }
}

/// Nearest-rank percentile: the element at index `floor(n * p / 100)`,
/// clamped to the last element.
///
/// Returns `NaN` for an empty slice.
///
/// ```
/// use movrank_stats::percentiles::compute_percentile;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(compute_percentile(&sorted, 50.0), 3.0);
/// assert_eq!(compute_percentile(&sorted, 100.0), 5.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    let Some(last) = sorted_values.len().checked_sub(1) else {
        return f64::NAN;
    };
    let index = (sorted_values.len() as f64 * percentile / 100.0) as usize;
    sorted_values[index.min(last)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_nan() {
        assert!(compute_percentile(&[], 50.0).is_nan());
        let percentiles = Percentiles::new(&[], &[10.0]);
        assert!(percentiles.get(10.0).unwrap().is_nan());
    }

    #[test]
    fn test_low_percentile_is_first_element() {
        assert_eq!(compute_percentile(&[7.0, 8.0, 9.0], 10.0), 7.0);
    }

    #[test]
    fn test_unrequested_point_is_none() {
        let percentiles = Percentiles::new(&[3.0, 1.0, 2.0], &[50.0]);
        assert_eq!(percentiles.get(90.0), None);
        assert_eq!(percentiles.iter().collect::<Vec<_>>(), vec![(50.0, 2.0)]);
    }
}
