//! Per-movie ranking across the chart.
//!
//! Two separate ranking algorithms are used:
//!
//! - **Ordinal rank** ([`movrank_stats::rank::ordinal_rank`]): the 1-based
//!   position of the target's value in the ascending-sorted population,
//!   ties taking their first position. Used for film rating, vote count,
//!   budget and worldwide gross.
//! - **Membership rank** ([`membership_ranks`]): for each country or
//!   language of the target, how many records share that value, and the
//!   target's position among them in chart order.
//!
//! [`RankingEngine`] derives the populations of a [`MovieTable`] once;
//! every [`RankingEngine::query`] builds a fresh [`MovieRanking`].

use movrank_stats::{
    rank::{ordinal_rank, ordinal_rank_by},
    tertile::{Grade, Thresholds},
};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    RankError,
    currency::{Amount, CurrencyTable, MoneyColumn, MoneyPopulation},
    record::{Column, MovieRecord},
    table::{MovieTable, ParseDiagnostics, ParseIssue},
    votes::parse_vote_count,
};

/// Position of a movie within a group of records, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupPosition {
    /// 1-based position of the movie within the group.
    pub position: usize,
    /// Number of records in the group.
    pub total: usize,
}

/// Membership rank of one constituent of a multi-valued field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipRank {
    pub value: String,
    /// Records containing `value` up to and including the movie's row.
    pub rank: usize,
    /// Records containing `value` in the whole table.
    pub total: usize,
}

/// Where a movie's vote count stands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoteStanding {
    pub text: String,
    /// Votes after unit scaling; `0.0` if the text could not be read.
    pub count: f64,
    pub rank: usize,
}

/// Where one of a movie's monetary values stands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoneyStanding {
    pub text: String,
    pub amount: Amount,
    /// Value used for ranking and grading.
    pub usd: f64,
    pub grade: Grade,
    pub thresholds: Thresholds,
    /// Ordinal rank in the whole table.
    pub rank: usize,
    /// Ordinal rank among movies of the same genre.
    pub related_rank: GroupPosition,
}

/// A same-genre movie, for the genre table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedMovie {
    pub position: usize,
    pub title: String,
    pub score: Option<f32>,
    pub is_target: bool,
}

/// Everything computed for one queried movie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRanking {
    pub title: String,
    /// Number of records in the table.
    pub population: usize,
    pub record: MovieRecord,
    pub genre: String,
    pub genre_position: GroupPosition,
    pub film_rating: String,
    /// Ordinal rank of the film rating among all film ratings.
    pub film_rating_rank: usize,
    pub film_rating_position: GroupPosition,
    pub votes: VoteStanding,
    pub budget: MoneyStanding,
    pub gross_worldwide: MoneyStanding,
    pub languages: Vec<MembershipRank>,
    pub countries: Vec<MembershipRank>,
    /// Same-genre movies in chart order.
    pub related: Vec<RelatedMovie>,
    /// Fields across the table that were counted as zero or left empty.
    pub parse_issues: usize,
}

/// Ranks movies of one table.
///
/// Construction normalizes and splits every record once; the table is
/// borrowed and never modified.
#[derive(Debug)]
pub struct RankingEngine<'a> {
    table: &'a MovieTable,
    currencies: &'a CurrencyTable,
    budgets: MoneyPopulation,
    grosses: MoneyPopulation,
    votes: Vec<f64>,
    languages: Vec<Vec<String>>,
    countries: Vec<Vec<String>>,
    diagnostics: ParseDiagnostics,
}

impl<'a> RankingEngine<'a> {
    #[must_use]
    pub fn new(table: &'a MovieTable, currencies: &'a CurrencyTable) -> Self {
        let records = table.records();
        let budgets = MoneyPopulation::collect(records, MoneyColumn::Budget, currencies);
        let grosses = MoneyPopulation::collect(records, MoneyColumn::GrossWorldwide, currencies);

        let mut diagnostics = table.diagnostics().clone();
        diagnostics.extend(budgets.issues().iter().cloned());
        diagnostics.extend(grosses.issues().iter().cloned());

        let votes = records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                parse_vote_count(&record.rating_numbers).unwrap_or_else(|kind| {
                    diagnostics.push(ParseIssue {
                        row,
                        column: Column::RatingNumbers,
                        kind,
                        text: record.rating_numbers.clone(),
                    });
                    0.0
                })
            })
            .collect();

        if !diagnostics.is_empty() {
            warn!(
                issues = diagnostics.len(),
                "some fields could not be read and were degraded"
            );
        }

        Self {
            table,
            currencies,
            budgets,
            grosses,
            votes,
            languages: records.iter().map(MovieRecord::languages).collect(),
            countries: records.iter().map(MovieRecord::countries).collect(),
            diagnostics,
        }
    }

    #[must_use]
    pub fn table(&self) -> &MovieTable {
        self.table
    }

    /// All parse issues: table reading plus money and vote parsing.
    #[must_use]
    pub fn diagnostics(&self) -> &ParseDiagnostics {
        &self.diagnostics
    }

    #[must_use]
    pub fn budgets(&self) -> &MoneyPopulation {
        &self.budgets
    }

    #[must_use]
    pub fn grosses(&self) -> &MoneyPopulation {
        &self.grosses
    }

    /// Ranks the first movie titled exactly `title`.
    pub fn query(&self, title: &str) -> Result<MovieRanking, RankError> {
        let index = self.table.position(title)?;
        let records = self.table.records();
        let record = &records[index];
        info!(title, row = index, "ranking movie");

        let related_rows = rows_where(records, |r| r.genre == record.genre);
        let genre_position = group_position(records, index, |r| r.genre == record.genre);
        let film_rating_position =
            group_position(records, index, |r| r.film_rating == record.film_rating);

        let mut ratings = records
            .iter()
            .map(|r| r.film_rating.as_str())
            .collect::<Vec<_>>();
        ratings.sort_unstable();
        let film_rating_rank = ordinal_rank(&ratings, &record.film_rating.as_str());

        let vote_count = self.votes[index];
        let mut votes = self.votes.clone();
        votes.sort_by(f64::total_cmp);
        let votes = VoteStanding {
            text: record.rating_numbers.clone(),
            count: vote_count,
            rank: ordinal_rank_by(&votes, &vote_count, f64::total_cmp),
        };

        let budget = self.money_standing(&self.budgets, index, &related_rows)?;
        let gross_worldwide = self.money_standing(&self.grosses, index, &related_rows)?;

        let related = related_rows
            .iter()
            .enumerate()
            .map(|(i, &row)| RelatedMovie {
                position: i + 1,
                title: records[row].title.clone(),
                score: records[row].score,
                is_target: row == index,
            })
            .collect();

        Ok(MovieRanking {
            title: record.title.clone(),
            population: records.len(),
            record: record.clone(),
            genre: record.genre.clone(),
            genre_position,
            film_rating: record.film_rating.clone(),
            film_rating_rank,
            film_rating_position,
            votes,
            budget,
            gross_worldwide,
            languages: membership_ranks(&self.languages, index),
            countries: membership_ranks(&self.countries, index),
            related,
            parse_issues: self.diagnostics.len(),
        })
    }

    fn money_standing(
        &self,
        population: &MoneyPopulation,
        index: usize,
        related_rows: &[usize],
    ) -> Result<MoneyStanding, RankError> {
        let text = population.column().text(&self.table.records()[index]);
        let usd = population.values()[index];

        let sorted = population.sorted();
        let thresholds = Thresholds::from_sorted(&sorted)?;

        let mut related = related_rows
            .iter()
            .map(|&row| population.values()[row])
            .collect::<Vec<_>>();
        related.sort_by(f64::total_cmp);

        Ok(MoneyStanding {
            text: text.to_owned(),
            amount: self.currencies.normalize(text),
            usd,
            grade: thresholds.grade(usd),
            thresholds,
            rank: ordinal_rank_by(&sorted, &usd, f64::total_cmp),
            related_rank: GroupPosition {
                position: ordinal_rank_by(&related, &usd, f64::total_cmp),
                total: related.len(),
            },
        })
    }
}

fn rows_where<F>(records: &[MovieRecord], mut predicate: F) -> Vec<usize>
where
    F: FnMut(&MovieRecord) -> bool,
{
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| predicate(r))
        .map(|(i, _)| i)
        .collect()
}

/// Position of record `index` among the records matching `in_group`, in
/// table order.
///
/// The record at `index` is expected to match `in_group`.
pub fn group_position<F>(records: &[MovieRecord], index: usize, mut in_group: F) -> GroupPosition
where
    F: FnMut(&MovieRecord) -> bool,
{
    let mut position = 0;
    let mut total = 0;
    for (i, record) in records.iter().enumerate() {
        if in_group(record) {
            total += 1;
            if i <= index {
                position = total;
            }
        }
    }
    GroupPosition { position, total }
}

/// Membership ranks of each value in `split_lists[index]`.
///
/// For a value `v`, `total` counts the lists containing `v` and `rank`
/// counts those among `split_lists[..=index]`. Ranks are aligned with the
/// target's list.
///
/// # Examples
///
/// ```
/// use movrank_engine::ranking::membership_ranks;
///
/// let lists = vec![
///     vec!["France".to_owned()],
///     vec!["Italy".to_owned(), "France".to_owned()],
///     vec!["France".to_owned()],
/// ];
/// let ranks = membership_ranks(&lists, 1);
/// assert_eq!(ranks[0].value, "Italy");
/// assert_eq!((ranks[0].rank, ranks[0].total), (1, 1));
/// assert_eq!((ranks[1].rank, ranks[1].total), (2, 3));
/// ```
#[must_use]
pub fn membership_ranks(split_lists: &[Vec<String>], index: usize) -> Vec<MembershipRank> {
    split_lists[index]
        .iter()
        .map(|value| {
            let contains = |list: &&Vec<String>| list.contains(value);
            MembershipRank {
                value: value.clone(),
                rank: split_lists[..=index].iter().filter(contains).count(),
                total: split_lists.iter().filter(contains).count(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ParseIssueKind;

    fn record(title: &str, genre: &str, budget: &str, gross: &str) -> MovieRecord {
        MovieRecord {
            title: title.into(),
            year: "2000".into(),
            film_rating: "R".into(),
            runtime: Some(120),
            score: Some(8.0),
            rating_numbers: "100K".into(),
            genre: genre.into(),
            language: "English".into(),
            keywords: None,
            budget: budget.into(),
            gross_worldwide: gross.into(),
            country: "United States".into(),
        }
    }

    /// Budgets `[100, 500, 1000, 5000, 9000, 20000]` in shuffled chart order.
    fn sample_table() -> MovieTable {
        MovieTable::from_records(vec![
            record("A", "Drama", "$5,000", "$50"),
            record("B", "Crime", "$100", "$10"),
            record("C", "Drama", "$20,000", "$60"),
            record("D", "Drama", "$9,000", "$40"),
            record("E", "Crime", "$500", "$20"),
            record("F", "Drama", "$1,000", "$30"),
        ])
    }

    #[test]
    fn test_budget_rank_grade_and_thresholds() {
        let table = sample_table();
        let currencies = CurrencyTable::default();
        let engine = RankingEngine::new(&table, &currencies);
        let ranking = engine.query("D").unwrap();

        assert_eq!(ranking.budget.usd, 9000.0);
        assert_eq!(ranking.budget.rank, 5);
        assert_eq!(ranking.budget.thresholds.medium, 500.0);
        assert_eq!(ranking.budget.thresholds.high, 9000.0);
        assert_eq!(ranking.budget.grade, Grade::High);
        // Drama budgets: 1000, 5000, 9000, 20000
        assert_eq!(
            ranking.budget.related_rank,
            GroupPosition {
                position: 3,
                total: 4
            }
        );
    }

    #[test]
    fn test_gross_grades_independently() {
        let table = sample_table();
        let currencies = CurrencyTable::default();
        let engine = RankingEngine::new(&table, &currencies);
        let ranking = engine.query("E").unwrap();
        // grosses sorted: 10 20 30 40 50 60 -> medium 20, high 50
        assert_eq!(ranking.gross_worldwide.grade, Grade::Mid);
        assert_eq!(ranking.gross_worldwide.rank, 2);
        assert_eq!(ranking.budget.grade, Grade::Mid);
    }

    #[test]
    fn test_genre_position_and_related_movies() {
        let table = sample_table();
        let currencies = CurrencyTable::default();
        let engine = RankingEngine::new(&table, &currencies);
        let ranking = engine.query("D").unwrap();

        assert_eq!(
            ranking.genre_position,
            GroupPosition {
                position: 3,
                total: 4
            }
        );
        let titles = ranking
            .related
            .iter()
            .map(|m| m.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["A", "C", "D", "F"]);
        assert!(ranking.related[2].is_target);
        assert_eq!(ranking.related.iter().filter(|m| m.is_target).count(), 1);
    }

    #[test]
    fn test_ranks_stay_within_population() {
        let table = sample_table();
        let currencies = CurrencyTable::default();
        let engine = RankingEngine::new(&table, &currencies);
        for record in table.iter() {
            let ranking = engine.query(&record.title).unwrap();
            let n = ranking.population;
            for rank in [
                ranking.film_rating_rank,
                ranking.votes.rank,
                ranking.budget.rank,
                ranking.gross_worldwide.rank,
            ] {
                assert!((1..=n).contains(&rank));
            }
            let related = ranking.budget.related_rank;
            assert!((1..=related.total).contains(&related.position));
        }
    }

    #[test]
    fn test_film_rating_and_votes_use_ordinal_rank() {
        let mut records = vec![
            record("A", "Drama", "$1", "$1"),
            record("B", "Drama", "$2", "$2"),
            record("C", "Drama", "$3", "$3"),
            record("D", "Drama", "$4", "$4"),
        ];
        records[0].film_rating = "PG-13".into();
        records[1].film_rating = "G".into();
        records[2].film_rating = "R".into();
        records[3].film_rating = "PG-13".into();
        records[0].rating_numbers = "1.2M".into();
        records[1].rating_numbers = "950K".into();
        records[2].rating_numbers = "1.2M".into();
        records[3].rating_numbers = "80K".into();
        let table = MovieTable::from_records(records);
        let currencies = CurrencyTable::default();
        let engine = RankingEngine::new(&table, &currencies);

        // sorted ratings: G, PG-13, PG-13, R
        let ranking = engine.query("D").unwrap();
        assert_eq!(ranking.film_rating_rank, 2);
        assert_eq!(
            ranking.film_rating_position,
            GroupPosition {
                position: 2,
                total: 2
            }
        );
        // sorted votes: 80K, 950K, 1.2M, 1.2M
        assert_eq!(ranking.votes.rank, 1);
        assert_eq!(engine.query("C").unwrap().votes.rank, 3);
        assert_eq!(engine.query("A").unwrap().votes.rank, 3);
        assert_eq!(engine.query("B").unwrap().votes.count, 950_000.0);
    }

    #[test]
    fn test_unparseable_values_rank_as_zero_and_are_counted() {
        let mut records = vec![
            record("A", "Drama", "$300", "$3"),
            record("B", "Drama", "n/a", "$2"),
            record("C", "Drama", "$100", "$1"),
        ];
        records[2].rating_numbers = "many".into();
        let table = MovieTable::from_records(records);
        let currencies = CurrencyTable::default();
        let engine = RankingEngine::new(&table, &currencies);
        assert_eq!(engine.diagnostics().len(), 2);

        let ranking = engine.query("B").unwrap();
        assert_eq!(ranking.budget.usd, 0.0);
        assert_eq!(ranking.budget.rank, 1);
        assert!(ranking.budget.amount.usd().is_none());
        assert_eq!(ranking.parse_issues, 2);
        assert_eq!(engine.query("C").unwrap().votes.count, 0.0);
    }

    #[test]
    fn test_nan_rate_ranks_as_zero() {
        let table = MovieTable::from_records(vec![
            record("A", "Drama", "$300", "$3"),
            record("B", "Drama", "€200", "$2"),
            record("C", "Drama", "$100", "€1"),
        ]);
        let currencies = CurrencyTable::new([("$", 1.0), ("€", f64::NAN)]);
        let engine = RankingEngine::new(&table, &currencies);
        assert_eq!(engine.diagnostics().len(), 2);

        let ranking = engine.query("B").unwrap();
        assert_eq!(
            ranking.budget.amount,
            Amount::Unparseable(ParseIssueKind::InvalidRate)
        );
        assert_eq!(ranking.budget.usd, 0.0);
        assert_eq!(ranking.budget.rank, 1);
        assert_eq!(engine.query("C").unwrap().gross_worldwide.rank, 1);
    }

    #[test]
    fn test_not_found() {
        let table = sample_table();
        let currencies = CurrencyTable::default();
        let engine = RankingEngine::new(&table, &currencies);
        let err = engine.query("Z").unwrap_err();
        assert!(matches!(err, RankError::NotFound { ref title } if title == "Z"));
        assert_eq!(err.to_string(), r#"movie not found: "Z""#);
    }

    #[test]
    fn test_too_few_movies_for_thresholds() {
        let table = MovieTable::from_records(vec![
            record("A", "Drama", "$1", "$1"),
            record("B", "Drama", "$2", "$2"),
        ]);
        let currencies = CurrencyTable::default();
        let engine = RankingEngine::new(&table, &currencies);
        assert!(matches!(
            engine.query("A"),
            Err(RankError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_membership_count_over_large_table() {
        let mut lists = vec![vec!["United States".to_owned()]; 250];
        for i in (0..250).step_by(20).take(12) {
            lists[i] = vec!["France".to_owned(), "Italy".to_owned()];
        }
        let ranks = membership_ranks(&lists, 40);
        assert_eq!(ranks[0].value, "France");
        assert_eq!(ranks[0].total, 12);
        assert_eq!(ranks[0].rank, 3);
        assert_eq!(ranks[1].total, 12);
    }

    #[test]
    fn test_membership_ranks_from_records() {
        let mut records = vec![
            record("A", "Drama", "$1", "$1"),
            record("B", "Drama", "$2", "$2"),
            record("C", "Drama", "$3", "$3"),
        ];
        records[0].country = "United StatesUnited Kingdom".into();
        records[1].country = "United Kingdom".into();
        records[2].country = "United KingdomFrance".into();
        let table = MovieTable::from_records(records);
        let currencies = CurrencyTable::default();
        let engine = RankingEngine::new(&table, &currencies);
        let ranking = engine.query("C").unwrap();

        assert_eq!(
            ranking.countries,
            vec![
                MembershipRank {
                    value: "United Kingdom".into(),
                    rank: 3,
                    total: 3
                },
                MembershipRank {
                    value: "France".into(),
                    rank: 1,
                    total: 1
                },
            ]
        );
        assert_eq!(ranking.languages[0].total, 3);
    }

    #[test]
    fn test_group_position() {
        let records = [
            record("A", "Drama", "$1", "$1"),
            record("B", "Crime", "$1", "$1"),
            record("C", "Drama", "$1", "$1"),
        ];
        let position = group_position(&records, 2, |r| r.genre == "Drama");
        assert_eq!(
            position,
            GroupPosition {
                position: 2,
                total: 2
            }
        );
    }

    #[test]
    fn test_ranking_serializes() {
        let table = sample_table();
        let currencies = CurrencyTable::default();
        let engine = RankingEngine::new(&table, &currencies);
        let json = serde_json::to_value(engine.query("A").unwrap()).unwrap();
        assert_eq!(json["budget"]["grade"], "mid");
        assert_eq!(json["budget"]["amount"]["usd"], 5000.0);
        assert_eq!(json["countries"][0]["value"], "United States");
    }
}
