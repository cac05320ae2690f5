use std::path::PathBuf;

use clap::Args;
use movrank_engine::CurrencyTable;

use crate::util::Output;

#[derive(Debug, Clone, Args)]
pub(crate) struct CurrenciesArg {
    /// Output file path
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Writes the built-in table in the format `--currencies` reads.
pub(crate) fn run(arg: &CurrenciesArg) -> anyhow::Result<()> {
    Output::save_json(&CurrencyTable::default(), arg.output.clone())
}

#[cfg(test)]
mod tests {
    use crate::util;

    use super::*;

    #[test]
    fn test_written_table_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("currencies.json");
        run(&CurrenciesArg {
            output: Some(path.clone()),
        })
        .unwrap();
        let table = util::read_currencies(Some(&path)).unwrap();
        let default = CurrencyTable::default();
        assert_eq!(table.len(), default.len());
        for ((prefix, rate), (expected_prefix, expected_rate)) in table.iter().zip(default.iter()) {
            assert_eq!(prefix, expected_prefix);
            assert!((rate - expected_rate).abs() <= expected_rate * 1e-12, "{prefix}");
        }
    }
}
