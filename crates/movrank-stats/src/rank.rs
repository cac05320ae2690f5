//! Ordinal ranking within a sorted population.

use std::cmp::Ordering;

/// Returns the 1-based position of the first element equal to `target`
/// in an ascending-sorted population.
///
/// Equal values share the position of their first occurrence, so the
/// result is the number of strictly smaller elements plus one. When
/// `target` is a member of `sorted_values` the result lies in
/// `1..=sorted_values.len()`.
///
/// # Panics
///
/// Panics if `sorted_values` is not sorted in ascending order.
///
/// # Examples
///
/// ```
/// use movrank_stats::rank::ordinal_rank;
///
/// let population = [1.0, 2.0, 2.0, 2.0, 5.0];
/// assert_eq!(ordinal_rank(&population, &2.0), 2);
/// assert_eq!(ordinal_rank(&population, &5.0), 5);
/// ```
#[must_use]
pub fn ordinal_rank<T>(sorted_values: &[T], target: &T) -> usize
where
    T: PartialOrd,
{
    ordinal_rank_by(sorted_values, target, |a, b| {
        a.partial_cmp(b).unwrap_or(Ordering::Equal)
    })
}

/// Like [`ordinal_rank`], with an explicit comparison function.
///
/// `compare` must be the order `sorted_values` was sorted by.
#[must_use]
pub fn ordinal_rank_by<T, F>(sorted_values: &[T], target: &T, mut compare: F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    assert!(
        sorted_values.is_sorted_by(|a, b| compare(a, b) != Ordering::Greater),
        "values must be sorted in ascending order"
    );
    sorted_values.partition_point(|v| compare(v, target) == Ordering::Less) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_of_each_member_is_within_bounds() {
        let population = [100.0, 500.0, 1000.0, 5000.0, 9000.0, 20000.0];
        for (i, value) in population.iter().enumerate() {
            let rank = ordinal_rank(&population, value);
            assert_eq!(rank, i + 1);
            assert!((1..=population.len()).contains(&rank));
        }
    }

    #[test]
    fn test_ties_take_first_occurrence() {
        let population = [0.0, 0.0, 0.0, 7.0, 7.0, 9.0];
        assert_eq!(ordinal_rank(&population, &0.0), 1);
        assert_eq!(ordinal_rank(&population, &7.0), 4);
        assert_eq!(ordinal_rank(&population, &9.0), 6);
    }

    #[test]
    fn test_strings_rank_lexicographically() {
        let mut ratings = vec!["R", "PG-13", "G", "R", "PG"];
        ratings.sort_unstable();
        assert_eq!(ordinal_rank(&ratings, &"G"), 1);
        assert_eq!(ordinal_rank(&ratings, &"R"), 4);
    }

    #[test]
    fn test_rank_by_total_order() {
        let population = [-1.0, 0.0, 3.5];
        assert_eq!(ordinal_rank_by(&population, &3.5, f64::total_cmp), 3);
    }
}
