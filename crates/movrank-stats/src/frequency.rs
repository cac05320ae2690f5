//! Counting occurrences of categorical values.

use std::collections::HashMap;
use std::hash::Hash;

/// Occurrence counts of values, remembering first-seen order.
///
/// Ordering by count uses first-seen order to break ties, so results are
/// deterministic for a given input order.
///
/// # Examples
///
/// ```
/// use movrank_stats::frequency::FrequencyTable;
///
/// let table = FrequencyTable::from_values(["Drama", "Crime", "Drama", "Action", "Crime", "Drama"]);
/// assert_eq!(table.count(&"Drama"), 3);
/// assert_eq!(table.most_common(2), vec![("Drama", 3), ("Crime", 2)]);
/// ```
#[derive(Debug, Clone)]
pub struct FrequencyTable<T> {
    entries: Vec<(T, usize)>,
    index: HashMap<T, usize>,
}

impl<T> Default for FrequencyTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> FrequencyTable<T>
where
    T: Eq + Hash + Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut table = Self::new();
        for value in values {
            table.add(value);
        }
        table
    }

    pub fn add(&mut self, value: T) {
        if let Some(&i) = self.index.get(&value) {
            self.entries[i].1 += 1;
        } else {
            self.index.insert(value.clone(), self.entries.len());
            self.entries.push((value, 1));
        }
    }

    #[must_use]
    pub fn count(&self, value: &T) -> usize {
        self.index.get(value).map_or(0, |&i| self.entries[i].1)
    }

    /// Total number of values added.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> {
        self.entries.iter().map(|(v, n)| (v, *n))
    }

    /// Up to `n` entries by descending count.
    #[must_use]
    pub fn most_common(&self, n: usize) -> Vec<(T, usize)> {
        let mut sorted = self.entries.clone();
        // stable sort keeps first-seen order among equal counts
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }
}
