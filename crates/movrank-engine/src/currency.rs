//! Normalization of scraped monetary text to US dollars.
//!
//! Box office cells look like `$25,000,000 (estimated)`, `₩15,000,000,000`
//! or `A$ 2 000 000`. Normalization strips separators and annotations,
//! splits the currency prefix from the amount and converts through a
//! [`CurrencyTable`]. Text that cannot be interpreted yields
//! [`Amount::Unparseable`]; population lists count such values as `0.0`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    record::{Column, MovieRecord},
    table::{ParseIssue, ParseIssueKind},
};

/// Conversion rates from currency prefix to USD.
///
/// The [`Default`] table covers the currencies seen in the chart:
///
/// | Prefix | USD rate |
/// |--------|----------|
/// | `$`    | 1 |
/// | `A$`   | 0.67059245 |
/// | `R$`   | 0.18482475 |
/// | `€`    | 1.0424475 |
/// | `£`    | 1.2083902 |
/// | `¥`    | 0.13893056 |
/// | `₩`    | 0.0007474863 |
/// | `₹`    | 0.012246969 |
/// | `DEM`  | 0.53307053 |
/// | `FRF`  | 0.15893336 |
/// | `MVR`  | 0.065187916 |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyTable {
    rates: BTreeMap<String, f64>,
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::new([
            ("R$", 0.184_824_75),
            ("₩", 0.000_747_486_3),
            ("€", 1.042_447_5),
            ("¥", 0.138_930_56),
            ("$", 1.0),
            ("DEM", 0.533_070_53),
            ("MVR", 0.065_187_916),
            ("FRF", 0.158_933_36),
            ("₹", 0.012_246_969),
            ("£", 1.208_390_2),
            ("A$", 0.670_592_45),
        ])
    }
}

impl CurrencyTable {
    pub fn new<I, S>(rates: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            rates: rates.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    #[must_use]
    pub fn rate(&self, prefix: &str) -> Option<f64> {
        self.rates.get(prefix).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(k, v)| (k.as_str(), *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Converts monetary text to USD.
    ///
    /// A rate that makes the result NaN or infinite (for example a `NaN`
    /// entry in a hand-edited table) gives
    /// [`ParseIssueKind::InvalidRate`].
    ///
    /// # Examples
    ///
    /// ```
    /// use movrank_engine::{Amount, CurrencyTable, ParseIssueKind};
    ///
    /// let table = CurrencyTable::default();
    /// assert_eq!(table.normalize("$13,000,000 (estimated)"), Amount::Usd(13_000_000.0));
    /// assert_eq!(table.normalize("A$ 2 000 000").usd(), Some(2_000_000.0 * 0.670_592_45));
    /// assert_eq!(table.normalize("XYZ100"), Amount::Unparseable(ParseIssueKind::UnknownCurrency));
    /// assert_eq!(table.normalize(" "), Amount::Unparseable(ParseIssueKind::MissingNumber));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn normalize(&self, text: &str) -> Amount {
        let cleaned = clean_money_text(text);
        let Some((prefix, number)) = split_prefix(&cleaned) else {
            return Amount::Unparseable(ParseIssueKind::MissingNumber);
        };
        let Some(rate) = self.rate(prefix) else {
            return Amount::Unparseable(ParseIssueKind::UnknownCurrency);
        };
        let Ok(amount) = number.parse::<u64>() else {
            return Amount::Unparseable(ParseIssueKind::InvalidNumber);
        };
        // populations are sorted and ranked, so NaN or infinity must not leak in
        let usd = amount as f64 * rate;
        if usd.is_finite() {
            Amount::Usd(usd)
        } else {
            Amount::Unparseable(ParseIssueKind::InvalidRate)
        }
    }
}

/// A normalized monetary value.
///
/// Keeps "the text said zero" apart from "the text could not be read",
/// which population lists both count as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Amount {
    Usd(f64),
    Unparseable(ParseIssueKind),
}

impl Amount {
    #[must_use]
    pub fn usd(self) -> Option<f64> {
        match self {
            Self::Usd(v) => Some(v),
            Self::Unparseable(_) => None,
        }
    }

    /// The value used in population math.
    #[must_use]
    pub fn or_zero(self) -> f64 {
        self.usd().unwrap_or(0.0)
    }
}

fn clean_money_text(text: &str) -> String {
    text.replace("(estimated)", "")
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '\u{a0}'))
        .collect()
}

/// Splits `prefix` from the first number `\d+(\.\d*)?` following it.
fn split_prefix(text: &str) -> Option<(&str, &str)> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let int_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let mut end = int_len;
    if rest[int_len..].starts_with('.') {
        let frac = &rest[int_len + 1..];
        end += 1 + frac
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(frac.len());
    }
    Some((&text[..start], &rest[..end]))
}

/// A column holding monetary text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyColumn {
    Budget,
    GrossWorldwide,
}

impl MoneyColumn {
    #[must_use]
    pub const fn column(self) -> Column {
        match self {
            Self::Budget => Column::Budget,
            Self::GrossWorldwide => Column::GrossWorldwide,
        }
    }

    #[must_use]
    pub fn text(self, record: &MovieRecord) -> &str {
        match self {
            Self::Budget => &record.budget,
            Self::GrossWorldwide => &record.gross_worldwide,
        }
    }
}

/// USD values of one monetary column, aligned with the records they came from.
#[derive(Debug, Clone)]
pub struct MoneyPopulation {
    column: MoneyColumn,
    values: Vec<f64>,
    issues: Vec<ParseIssue>,
}

impl MoneyPopulation {
    /// Normalizes `column` of every record; unreadable values count as `0.0`.
    pub fn collect<'a, I>(records: I, column: MoneyColumn, currencies: &CurrencyTable) -> Self
    where
        I: IntoIterator<Item = &'a MovieRecord>,
    {
        let mut values = Vec::new();
        let mut issues = Vec::new();
        for (row, record) in records.into_iter().enumerate() {
            let text = column.text(record);
            let amount = currencies.normalize(text);
            if let Amount::Unparseable(kind) = amount {
                issues.push(ParseIssue {
                    row,
                    column: column.column(),
                    kind,
                    text: text.to_owned(),
                });
            }
            values.push(amount.or_zero());
        }
        if !issues.is_empty() {
            warn!(
                column = column.column().header(),
                unparseable = issues.len(),
                total = values.len(),
                "monetary values counted as zero"
            );
        }
        Self {
            column,
            values,
            issues,
        }
    }

    #[must_use]
    pub fn column(&self) -> MoneyColumn {
        self.column
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Values in ascending order.
    #[must_use]
    pub fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }

    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }
}
