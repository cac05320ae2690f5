use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{currencies::CurrenciesArg, report::ReportArg, stats::StatsArg};

mod currencies;
mod report;
mod stats;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log more (-v debug, -vv trace); overrides RUST_LOG
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Rank one movie against the table and print the narrative report
    Report(#[clap(flatten)] ReportArg),
    /// Print dataset-wide statistics of a cleaned table
    Stats(#[clap(flatten)] StatsArg),
    /// Print the default currency table as JSON
    Currencies(#[clap(flatten)] CurrenciesArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.verbose);
    match &args.mode {
        Mode::Report(arg) => report::run(arg)?,
        Mode::Stats(arg) => stats::run(arg)?,
        Mode::Currencies(arg) => currencies::run(arg)?,
    }
    Ok(())
}

/// Logs go to stderr so that reports and JSON on stdout stay clean.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("movrank=info")),
        1 => EnvFilter::new("movrank=debug"),
        _ => EnvFilter::new("movrank=trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
