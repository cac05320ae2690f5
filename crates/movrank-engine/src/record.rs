//! Movie records and the columns they are read from.

use serde::Serialize;

use crate::split::split_multi_valued;

/// A column of the movie chart table, named by its exact header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Column {
    #[serde(rename = "Title")]
    Title,
    #[serde(rename = "Year")]
    Year,
    #[serde(rename = "Film rating")]
    FilmRating,
    #[serde(rename = "Time")]
    Time,
    #[serde(rename = "Score")]
    Score,
    #[serde(rename = "Rating Numbers")]
    RatingNumbers,
    #[serde(rename = "Genre")]
    Genre,
    #[serde(rename = "Language")]
    Language,
    #[serde(rename = "Keywords")]
    Keywords,
    #[serde(rename = "Budget")]
    Budget,
    #[serde(rename = "Gross worldwide")]
    GrossWorldwide,
    #[serde(rename = "Country")]
    Country,
}

impl Column {
    /// All columns in chart export order.
    pub const ALL: [Self; 12] = [
        Self::Title,
        Self::Year,
        Self::FilmRating,
        Self::Time,
        Self::Score,
        Self::RatingNumbers,
        Self::Genre,
        Self::Language,
        Self::Keywords,
        Self::Budget,
        Self::GrossWorldwide,
        Self::Country,
    ];

    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Year => "Year",
            Self::FilmRating => "Film rating",
            Self::Time => "Time",
            Self::Score => "Score",
            Self::RatingNumbers => "Rating Numbers",
            Self::Genre => "Genre",
            Self::Language => "Language",
            Self::Keywords => "Keywords",
            Self::Budget => "Budget",
            Self::GrossWorldwide => "Gross worldwide",
            Self::Country => "Country",
        }
    }

    /// Whether a table must carry this column to be ranked.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Score | Self::Keywords)
    }

    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        Self::ALL.into_iter().find(|c| c.header() == header)
    }
}

pub(crate) fn join_headers(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|c| format!("{:?}", c.header()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One row of the chart.
///
/// Text fields hold the scraped text unchanged; interpretation (currency
/// normalization, splitting, vote units) happens in the modules that need it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MovieRecord {
    pub title: String,
    /// Release date text, e.g. `December 18, 1974 (United States)`.
    pub year: String,
    pub film_rating: String,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    pub score: Option<f32>,
    /// Vote count with unit suffix, e.g. `1.2M`.
    pub rating_numbers: String,
    pub genre: String,
    /// Camel-joined language names, e.g. `EnglishItalian`.
    pub language: String,
    pub keywords: Option<String>,
    pub budget: String,
    pub gross_worldwide: String,
    /// Camel-joined country names, e.g. `United StatesUnited Kingdom`.
    pub country: String,
}

impl MovieRecord {
    /// Text of a string-valued column.
    ///
    /// Returns `None` for the numeric columns (`Time`, `Score`) and for an
    /// absent `Keywords` value.
    #[must_use]
    pub fn text(&self, column: Column) -> Option<&str> {
        let text = match column {
            Column::Title => &self.title,
            Column::Year => &self.year,
            Column::FilmRating => &self.film_rating,
            Column::RatingNumbers => &self.rating_numbers,
            Column::Genre => &self.genre,
            Column::Language => &self.language,
            Column::Budget => &self.budget,
            Column::GrossWorldwide => &self.gross_worldwide,
            Column::Country => &self.country,
            Column::Keywords => return self.keywords.as_deref(),
            Column::Time | Column::Score => return None,
        };
        Some(text)
    }

    #[must_use]
    pub fn languages(&self) -> Vec<String> {
        split_multi_valued(&self.language)
    }

    #[must_use]
    pub fn countries(&self) -> Vec<String> {
        split_multi_valued(&self.country)
    }

    /// Whether every required field carries a value.
    ///
    /// Only an empty cell is missing. The scraper writes a single space for
    /// an unknown film rating or box-office figure, and such records stay.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.runtime.is_some()
            && Column::ALL
                .into_iter()
                .filter(|c| c.is_required())
                .filter_map(|c| self.text(c))
                .all(|text| !text.is_empty())
    }

    /// Field name and display value pairs, in column order.
    ///
    /// Multi-valued fields are split and joined with `", "`.
    #[must_use]
    pub fn basic_info(&self) -> Vec<(&'static str, String)> {
        Column::ALL
            .into_iter()
            .filter_map(|column| {
                let value = match column {
                    Column::Time => self.runtime?.to_string(),
                    Column::Score => self.score?.to_string(),
                    Column::Language => self.languages().join(", "),
                    Column::Country => self.countries().join(", "),
                    _ => self.text(column)?.to_owned(),
                };
                Some((column.header(), value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MovieRecord {
        MovieRecord {
            title: "The Godfather Part II".into(),
            year: "December 18, 1974 (United States)".into(),
            film_rating: "R".into(),
            runtime: Some(202),
            score: Some(9.0),
            rating_numbers: "1.3M".into(),
            genre: "Crime".into(),
            language: "EnglishItalianSpanishLatinSicilian".into(),
            keywords: None,
            budget: "$13,000,000 (estimated)".into(),
            gross_worldwide: "$47,961,919".into(),
            country: "United States".into(),
        }
    }

    #[test]
    fn test_header_round_trip() {
        for column in Column::ALL {
            assert_eq!(Column::from_header(column.header()), Some(column));
        }
        assert_eq!(Column::from_header(" Gross worldwide "), Some(Column::GrossWorldwide));
        assert_eq!(Column::from_header("gross worldwide"), None);
    }

    #[test]
    fn test_optional_columns() {
        let optional = Column::ALL
            .into_iter()
            .filter(|c| !c.is_required())
            .collect::<Vec<_>>();
        assert_eq!(optional, vec![Column::Score, Column::Keywords]);
    }

    #[test]
    fn test_complete_record() {
        let mut record = sample();
        assert!(record.is_complete());
        record.budget = String::new();
        assert!(!record.is_complete());
        let mut record = sample();
        record.runtime = None;
        assert!(!record.is_complete());
    }

    #[test]
    fn test_blank_placeholders_count_as_values() {
        let mut record = sample();
        record.budget = " ".into();
        record.film_rating = " ".into();
        assert!(record.is_complete());
    }

    #[test]
    fn test_basic_info_joins_split_values() {
        let info = sample().basic_info();
        let language = info.iter().find(|(k, _)| *k == "Language").unwrap();
        assert_eq!(language.1, "English, Italian, Spanish, Latin, Sicilian");
        assert!(info.iter().all(|(k, _)| *k != "Keywords"));
        let time = info.iter().find(|(k, _)| *k == "Time").unwrap();
        assert_eq!(time.1, "202");
    }
}
