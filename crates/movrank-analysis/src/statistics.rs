//! Dataset-wide statistics over a cleaned table.

use std::collections::BTreeMap;

use movrank_engine::{CurrencyTable, MoneyColumn, MoneyPopulation, MovieTable, Thresholds};
use movrank_stats::{
    descriptive::DescriptiveStats, frequency::FrequencyTable, percentiles::Percentiles,
};
use serde::Serialize;
use tracing::debug;

use crate::cleaning::{self, CleaningSummary};

/// Bucket name for countries below [`StatisticsConfig::min_country_count`].
pub const OTHER_COUNTRIES: &str = "Other Countries";

/// Percentile points reported for runtimes.
pub const RUNTIME_PERCENTILES: [f64; 5] = [10.0, 25.0, 50.0, 75.0, 90.0];

#[derive(Debug, Clone, Copy)]
pub struct StatisticsConfig {
    /// Number of genres kept in [`DatasetStatistics::genres`].
    pub top_genres: usize,
    /// Smallest movie count for a country to get its own bucket.
    pub min_country_count: usize,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            top_genres: 10,
            min_country_count: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryBucket {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecadeCount {
    /// First year of the decade, e.g. `1990`.
    pub decade: u16,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

/// Summary of one monetary column in USD.
#[derive(Debug, Clone, Serialize)]
pub struct MoneySummary {
    pub stats: Option<DescriptiveStats>,
    /// `None` for fewer than three movies.
    pub thresholds: Option<Thresholds>,
    /// Values that could not be read and were counted as zero.
    pub unparseable: usize,
}

impl MoneySummary {
    fn from_population(population: &MoneyPopulation) -> Self {
        let sorted = population.sorted();
        Self {
            stats: DescriptiveStats::from_sorted(&sorted),
            thresholds: Thresholds::from_sorted(&sorted).ok(),
            unparseable: population.issues().len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RuntimeSummary {
    pub stats: Option<DescriptiveStats>,
    pub percentiles: Percentiles,
}

/// Aggregates of a movie table.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetStatistics {
    pub cleaning: CleaningSummary,
    /// Movies per primary country, largest first, "Other Countries" last.
    pub countries: Vec<CountryBucket>,
    /// Movies per release decade, ascending.
    pub decades: Vec<DecadeCount>,
    /// Movies whose release year could not be read.
    pub unknown_years: usize,
    /// Most common genres, most frequent first.
    pub genres: Vec<GenreCount>,
    pub runtime: RuntimeSummary,
    pub budget: MoneySummary,
    pub gross_worldwide: MoneySummary,
}

impl DatasetStatistics {
    /// Cleans `table` and computes every aggregate on the result.
    #[must_use]
    pub fn compute(
        table: &MovieTable,
        currencies: &CurrencyTable,
        config: &StatisticsConfig,
    ) -> Self {
        let (table, cleaning) = cleaning::clean(table);

        let (decades, unknown_years) = decade_counts(&table);
        let runtimes = table
            .iter()
            .filter_map(|r| r.runtime)
            .map(f64::from)
            .collect::<Vec<_>>();
        let budgets = MoneyPopulation::collect(table.iter(), MoneyColumn::Budget, currencies);
        let grosses =
            MoneyPopulation::collect(table.iter(), MoneyColumn::GrossWorldwide, currencies);

        let stats = Self {
            cleaning,
            countries: country_distribution(&table, config.min_country_count),
            decades,
            unknown_years,
            genres: genre_frequencies(&table, config.top_genres),
            runtime: RuntimeSummary {
                stats: DescriptiveStats::new(runtimes.iter().copied()),
                percentiles: Percentiles::new(&runtimes, &RUNTIME_PERCENTILES),
            },
            budget: MoneySummary::from_population(&budgets),
            gross_worldwide: MoneySummary::from_population(&grosses),
        };
        debug!(
            countries = stats.countries.len(),
            decades = stats.decades.len(),
            genres = stats.genres.len(),
            "dataset statistics computed"
        );
        stats
    }
}

/// Movies per primary country.
///
/// Countries with at least `min_count` movies get a bucket of their own, in
/// descending count order; the rest are summed into [`OTHER_COUNTRIES`],
/// which is always present and always last.
#[must_use]
pub fn country_distribution(table: &MovieTable, min_count: usize) -> Vec<CountryBucket> {
    let counts = FrequencyTable::from_values(
        table
            .iter()
            .filter_map(|r| cleaning::primary_country(&r.country)),
    );
    let (named, others): (Vec<_>, Vec<_>) = counts
        .most_common(counts.len())
        .into_iter()
        .partition(|(_, count)| *count >= min_count);

    let mut buckets = named
        .into_iter()
        .map(|(name, count)| CountryBucket { name, count })
        .collect::<Vec<_>>();
    buckets.push(CountryBucket {
        name: OTHER_COUNTRIES.to_owned(),
        count: others.iter().map(|(_, count)| count).sum(),
    });
    buckets
}

/// Movies per decade, plus the number of unreadable years.
#[must_use]
pub fn decade_counts(table: &MovieTable) -> (Vec<DecadeCount>, usize) {
    let mut decades = BTreeMap::new();
    let mut unknown = 0;
    for record in table.iter() {
        match cleaning::release_year(&record.year) {
            Some(year) => *decades.entry(10 * (year / 10)).or_insert(0) += 1,
            None => unknown += 1,
        }
    }
    let decades = decades
        .into_iter()
        .map(|(decade, count)| DecadeCount { decade, count })
        .collect();
    (decades, unknown)
}

/// The `top_n` most common genres.
#[must_use]
pub fn genre_frequencies(table: &MovieTable, top_n: usize) -> Vec<GenreCount> {
    FrequencyTable::from_values(table.iter().flat_map(cleaning::genres))
        .most_common(top_n)
        .into_iter()
        .map(|(genre, count)| GenreCount {
            genre: genre.to_owned(),
            count,
        })
        .collect()
}
