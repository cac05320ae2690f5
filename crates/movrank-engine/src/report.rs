//! Narrative text for a finished [`MovieRanking`].
//!
//! Rendering is template filling only; every number shown was computed by
//! [`crate::ranking`].

use std::fmt::{self, Display, Formatter, Write as _};

use movrank_stats::tertile::Grade;

use crate::{
    currency::Amount,
    ranking::{MembershipRank, MoneyStanding, MovieRanking},
};

/// Inner width of the same-genre table box.
const TABLE_WIDTH: usize = 76;

const HIGHLIGHT_START: &str = "\x1b[31m";
const HIGHLIGHT_END: &str = "\x1b[0m";

/// Plain-text report of one ranking.
///
/// The target row of the same-genre table is highlighted in red by
/// default; [`ReportText::with_color`] turns that off, in which case the
/// row is marked with `*` instead.
#[derive(Debug, Clone, Copy)]
pub struct ReportText<'a> {
    ranking: &'a MovieRanking,
    color: bool,
}

impl<'a> ReportText<'a> {
    #[must_use]
    pub fn new(ranking: &'a MovieRanking) -> Self {
        Self {
            ranking,
            color: true,
        }
    }

    #[must_use]
    pub fn with_color(self, color: bool) -> Self {
        Self { color, ..self }
    }

    #[must_use]
    pub fn genre_line(&self) -> String {
        let r = self.ranking;
        format!(
            "{:?} ranked No.{} / {} in {} genre.",
            r.title, r.genre_position.position, r.genre_position.total, r.genre
        )
    }

    /// `None` if the movie lists no language.
    #[must_use]
    pub fn language_line(&self) -> Option<String> {
        self.membership_line(&self.ranking.languages, |m| {
            format!("No.{} / {} in {} language movie(s)", m.rank, m.total, m.value)
        })
    }

    /// `None` if the movie lists no country.
    #[must_use]
    pub fn country_line(&self) -> Option<String> {
        self.membership_line(&self.ranking.countries, |m| {
            format!("No.{} / {} in the {} movie(s)", m.rank, m.total, m.value)
        })
    }

    fn membership_line<F>(&self, ranks: &[MembershipRank], item: F) -> Option<String>
    where
        F: FnMut(&MembershipRank) -> String,
    {
        if ranks.is_empty() {
            return None;
        }
        let items = ranks.iter().map(item).collect::<Vec<_>>();
        Some(format!("{:?} ranked {}.", self.ranking.title, items.join(", ")))
    }

    #[must_use]
    pub fn film_rating_line(&self) -> String {
        let r = self.ranking;
        format!(
            "{:?} ranked No.{} in {} film rating movie.",
            r.title, r.film_rating_rank, r.film_rating
        )
    }

    #[must_use]
    pub fn votes_line(&self) -> String {
        let r = self.ranking;
        format!(
            "Based on the number of votes ({}) from users, {:?} was ranked No.{} out of the top {} movies.",
            r.votes.text, r.title, r.votes.rank, r.population
        )
    }

    /// Budget and worldwide gross in one sentence.
    ///
    /// The two halves are joined with "and" when both have the same grade
    /// and with "but" otherwise.
    #[must_use]
    pub fn money_line(&self) -> String {
        let r = self.ranking;
        let budget = &r.budget;
        let gross = &r.gross_worldwide;
        let budget_grade = match budget.grade {
            Grade::High => "high",
            Grade::Mid => "mid",
            Grade::Low => "low",
        };
        let gross_grade = match gross.grade {
            Grade::High => "high",
            Grade::Mid => "middling",
            Grade::Low => "low",
        };
        let conjunction = if budget.grade == gross.grade {
            "and"
        } else {
            "but"
        };
        format!(
            "{title:?} is a {budget_grade}-budget ({}) movie (its budget ranks {}), \
             {conjunction} its worldwide gross ({}) is {gross_grade} (it ranks {}).",
            format_amount(budget.amount),
            self.money_ranks(budget),
            format_amount(gross.amount),
            self.money_ranks(gross),
            title = r.title,
        )
    }

    fn money_ranks(&self, standing: &MoneyStanding) -> String {
        let r = self.ranking;
        format!(
            "No.{} in the top {} movies and No.{} / {} in {} genre",
            standing.rank,
            r.population,
            standing.related_rank.position,
            standing.related_rank.total,
            r.genre
        )
    }

    /// Field table of the queried record.
    #[must_use]
    pub fn basic_info(&self) -> String {
        let r = self.ranking;
        let mut text = format!("Basic information about {:?}:", r.title);
        for (key, value) in r.record.basic_info() {
            let _ = write!(text, "\n  {key:<16} {value}");
        }
        text
    }

    /// Boxed list of all movies sharing the genre, target highlighted.
    #[must_use]
    pub fn genre_table(&self) -> String {
        let r = self.ranking;
        let border = format!(" {}", "-".repeat(TABLE_WIDTH));
        let mut lines = vec![
            border.clone(),
            boxed_row(&format!("All movies in the {:?} genre:", r.genre), None),
            border.clone(),
        ];
        for movie in &r.related {
            let text = format!("No.{} {}", movie.position, movie.title);
            let row = match (movie.is_target, self.color) {
                (false, _) => boxed_row(&text, None),
                (true, true) => boxed_row(&text, Some((HIGHLIGHT_START, HIGHLIGHT_END))),
                (true, false) => boxed_row(&format!("{text} *"), None),
            };
            lines.push(row);
        }
        lines.push(border);
        lines.join("\n")
    }
}

impl Display for ReportText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.genre_line())?;
        for line in [self.language_line(), self.country_line()]
            .into_iter()
            .flatten()
        {
            writeln!(f, "{line}")?;
        }
        writeln!(f, "{}", self.film_rating_line())?;
        writeln!(f, "{}", self.votes_line())?;
        writeln!(f, "{}", self.money_line())?;
        writeln!(f)?;
        writeln!(f, "{}", self.basic_info())?;
        writeln!(f)?;
        writeln!(f, "{}", self.genre_table())
    }
}

fn format_amount(amount: Amount) -> String {
    match amount {
        Amount::Usd(usd) => format!("${usd:.2}"),
        Amount::Unparseable(_) => "amount unknown".to_owned(),
    }
}

/// `| text<padding>|`, padded by visible width; overlong text is not cut.
fn boxed_row(text: &str, highlight: Option<(&str, &str)>) -> String {
    let padding = (TABLE_WIDTH - 1).saturating_sub(text.chars().count());
    let (start, end) = highlight.unwrap_or_default();
    format!("| {start}{text}{end}{}|", " ".repeat(padding))
}
