//! Dataset statistics command
//!
//! Cleans the table and prints country, decade, genre, runtime and money
//! summaries, either as aligned text tables or as JSON.

use std::{
    fmt::{self, Write as _},
    path::PathBuf,
};

use chrono::{DateTime, Utc};
use clap::Args;
use movrank_analysis::statistics::{DatasetStatistics, MoneySummary, StatisticsConfig};
use movrank_engine::Thresholds;
use serde::Serialize;

use crate::util::{self, DataFormat, Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct StatsArg {
    /// Path to the movie table (CSV or JSON)
    pub data: PathBuf,

    /// Format of the movie table; guessed from the extension by default
    #[arg(long, value_enum)]
    pub format: Option<DataFormat>,

    /// JSON file mapping currency prefixes to USD rates
    #[arg(long)]
    pub currencies: Option<PathBuf>,

    /// Number of most common genres to list
    #[arg(long, default_value_t = 10)]
    pub top_genres: usize,

    /// Smallest movie count for a country to be listed on its own
    #[arg(long, default_value_t = 20)]
    pub min_country_count: usize,

    /// Write the statistics as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Output file path
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct StatisticsReport<'a> {
    generated_at: DateTime<Utc>,
    source: String,
    statistics: &'a DatasetStatistics,
}

pub(crate) fn run(arg: &StatsArg) -> anyhow::Result<()> {
    let table = util::read_movie_table(&arg.data, arg.format)?;
    let currencies = util::read_currencies(arg.currencies.as_deref())?;
    let config = StatisticsConfig {
        top_genres: arg.top_genres,
        min_country_count: arg.min_country_count,
    };
    let statistics = DatasetStatistics::compute(&table, &currencies, &config);
    let source = arg.data.display().to_string();

    if arg.json {
        let report = StatisticsReport {
            generated_at: Utc::now(),
            source,
            statistics: &statistics,
        };
        return Output::save_json(&report, arg.output.clone());
    }

    let mut text = String::new();
    write_statistics(&mut text, &source, &statistics)?;
    let mut output = Output::from_output_path(arg.output.clone())?;
    output.write_text(&text)
}

fn write_statistics(
    out: &mut String,
    source: &str,
    stats: &DatasetStatistics,
) -> fmt::Result {
    writeln!(out, "Dataset Statistics ({source})")?;
    writeln!(out, "==========================================\n")?;

    let c = &stats.cleaning;
    writeln!(
        out,
        "Records: {} read, {} incomplete, {} duplicate titles, {} kept\n",
        c.input, c.incomplete, c.duplicates, c.kept
    )?;

    writeln!(out, "Countries (primary country):")?;
    write_header(out, "Country")?;
    for bucket in &stats.countries {
        writeln!(out, "  {:<24} {:>8}", bucket.name, bucket.count)?;
    }
    writeln!(out)?;

    writeln!(out, "Decades:")?;
    write_header(out, "Decade")?;
    for decade in &stats.decades {
        writeln!(out, "  {:<24} {:>8}", format!("{}s", decade.decade), decade.count)?;
    }
    if stats.unknown_years > 0 {
        writeln!(out, "  {:<24} {:>8}", "(unknown)", stats.unknown_years)?;
    }
    writeln!(out)?;

    writeln!(out, "Genres:")?;
    write_header(out, "Genre")?;
    for genre in &stats.genres {
        writeln!(out, "  {:<24} {:>8}", genre.genre, genre.count)?;
    }
    writeln!(out)?;

    writeln!(out, "Runtime (minutes):")?;
    match &stats.runtime.stats {
        Some(s) => {
            writeln!(
                out,
                "  count={} min={:.0} median={:.0} mean={:.1} max={:.0} std_dev={:.1}",
                s.count, s.min, s.median, s.mean, s.max, s.std_dev
            )?;
            let percentiles = stats
                .runtime
                .percentiles
                .iter()
                .map(|(p, v)| format!("P{p:02.0}={v:.0}"))
                .collect::<Vec<_>>();
            writeln!(out, "  {}", percentiles.join(" "))?;
        }
        None => writeln!(out, "  (no data)")?,
    }
    writeln!(out)?;

    write_money(out, "Budget (USD)", &stats.budget)?;
    writeln!(out)?;
    write_money(out, "Gross worldwide (USD)", &stats.gross_worldwide)
}

fn write_header(out: &mut String, label: &str) -> fmt::Result {
    writeln!(out, "  {label:<24} {:>8}", "Movies")?;
    writeln!(out, "  {}", "-".repeat(33))
}

fn write_money(out: &mut String, label: &str, money: &MoneySummary) -> fmt::Result {
    writeln!(out, "{label}:")?;
    let Some(s) = &money.stats else {
        return writeln!(out, "  (no data)");
    };
    writeln!(
        out,
        "  count={} min={:.2} median={:.2} mean={:.2} max={:.2}",
        s.count, s.min, s.median, s.mean, s.max
    )?;
    if let Some(Thresholds { medium, high }) = money.thresholds {
        writeln!(out, "  mid-tier from {medium:.2}, high-tier from {high:.2}")?;
    }
    if money.unparseable > 0 {
        writeln!(out, "  {} value(s) unreadable, counted as 0", money.unparseable)?;
    }
    Ok(())
}
