//! Ranking report for one movie.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use movrank_engine::{
    CurrencyTable, MovieRanking, MovieTable, ParseDiagnostics, RankingEngine, report::ReportText,
};
use serde::Serialize;
use tracing::warn;

use crate::util::{self, DataFormat, Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct ReportArg {
    /// Path to the movie table (CSV or JSON)
    pub data: PathBuf,

    /// Format of the movie table; guessed from the extension by default
    #[arg(long, value_enum)]
    pub format: Option<DataFormat>,

    /// Exact title of the movie to rank
    #[arg(long)]
    pub title: String,

    /// JSON file mapping currency prefixes to USD rates
    #[arg(long)]
    pub currencies: Option<PathBuf>,

    /// Write the ranking as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Output file path
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Do not highlight the movie in the genre table
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Serialize)]
struct RankingReport<'a> {
    generated_at: DateTime<Utc>,
    source: String,
    ranking: &'a MovieRanking,
    diagnostics: &'a ParseDiagnostics,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let table = util::read_movie_table(&arg.data, arg.format)?;
    let currencies = util::read_currencies(arg.currencies.as_deref())?;
    let text = render_report(&table, &currencies, arg, use_color(arg))?;
    let mut output = Output::from_output_path(arg.output.clone())?;
    output.write_text(&text)
}

/// Escape codes only make sense on a terminal.
fn use_color(arg: &ReportArg) -> bool {
    !arg.no_color && arg.output.is_none()
}

fn render_report(
    table: &MovieTable,
    currencies: &CurrencyTable,
    arg: &ReportArg,
    color: bool,
) -> anyhow::Result<String> {
    let engine = RankingEngine::new(table, currencies);
    let ranking = engine.query(&arg.title)?;

    for (column, count) in engine.diagnostics().count_by_column() {
        warn!(column = column.header(), count, "unreadable values");
    }

    if arg.json {
        let report = RankingReport {
            generated_at: Utc::now(),
            source: arg.data.display().to_string(),
            ranking: &ranking,
            diagnostics: engine.diagnostics(),
        };
        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        return Ok(json);
    }

    Ok(ReportText::new(&ranking).with_color(color).to_string())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use movrank_engine::{MovieRecord, RankError};
    use serde_json::Value;

    use super::*;

    fn record(title: &str, genre: &str, budget: &str) -> MovieRecord {
        MovieRecord {
            title: title.into(),
            year: "1995".into(),
            film_rating: "R".into(),
            runtime: Some(120),
            rating_numbers: "500K".into(),
            genre: genre.into(),
            language: "English".into(),
            budget: budget.into(),
            gross_worldwide: "$1,000".into(),
            country: "United States".into(),
            ..MovieRecord::default()
        }
    }

    fn table() -> MovieTable {
        MovieTable::from_records(vec![
            record("Heat", "Crime", "$300"),
            record("Ran", "Drama", "n/a"),
            record("Seven", "Crime", "$100"),
        ])
    }

    fn arg(title: &str) -> ReportArg {
        ReportArg {
            data: PathBuf::from("top.csv"),
            format: None,
            title: title.into(),
            currencies: None,
            json: false,
            output: None,
            no_color: false,
        }
    }

    #[test]
    fn test_unknown_title_is_not_found() {
        let err = render_report(&table(), &CurrencyTable::default(), &arg("Alien"), false)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RankError>(),
            Some(RankError::NotFound { title }) if title == "Alien"
        ));
    }

    #[test]
    fn test_json_report_shape() {
        let arg = ReportArg {
            json: true,
            ..arg("Seven")
        };
        let json = render_report(&table(), &CurrencyTable::default(), &arg, true).unwrap();
        assert!(json.ends_with("}\n"));
        assert!(!json.contains('\x1b'));

        let value: Value = serde_json::from_str(&json).unwrap();
        let keys = value.as_object().unwrap().keys().collect::<Vec<_>>();
        assert_eq!(keys, ["diagnostics", "generated_at", "ranking", "source"]);
        assert_eq!(value["source"], "top.csv");
        assert_eq!(value["ranking"]["title"], "Seven");
        assert_eq!(value["diagnostics"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_text_report_color_follows_flag() {
        let currencies = CurrencyTable::default();
        let colored = render_report(&table(), &currencies, &arg("Seven"), true).unwrap();
        assert!(colored.contains('\x1b'));
        let plain = render_report(&table(), &currencies, &arg("Seven"), false).unwrap();
        assert!(!plain.contains('\x1b'));
        assert!(plain.contains("No.2 Seven *"));
    }

    #[test]
    fn test_color_only_on_stdout() {
        assert!(use_color(&arg("Heat")));
        assert!(!use_color(&ReportArg {
            no_color: true,
            ..arg("Heat")
        }));
        assert!(!use_color(&ReportArg {
            output: Some(PathBuf::from("report.txt")),
            ..arg("Heat")
        }));
    }

    #[test]
    fn test_run_writes_plain_text_to_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("top.csv");
        fs::write(
            &data,
            "Title,Year,Film rating,Time,Rating Numbers,Genre,Language,Budget,Gross worldwide,Country\n\
             Heat,1995,R,170,700K,Crime,English,\"$60,000,000\",\"$187,436,818\",United States\n\
             Ran,1985,R,162,130K,Drama,Japanese,\"¥2,400,000,000\",\"$4,000,000\",Japan\n\
             Seven,1995,R,127,1.8M,Crime,English,\"$33,000,000\",\"$327,311,859\",United States\n",
        )
        .unwrap();
        let output = dir.path().join("report.txt");
        let arg = ReportArg {
            data,
            output: Some(output.clone()),
            ..arg("Seven")
        };
        run(&arg).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.contains(r#""Seven""#), "{text}");
        assert!(text.contains("No.2 Seven *"), "{text}");
        assert!(!text.contains('\x1b'));
    }
}
