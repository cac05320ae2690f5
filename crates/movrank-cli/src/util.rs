use std::{
    fmt::Display,
    fs::File,
    io::{self, BufWriter, Read, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::{Context, bail, ensure};
use clap::ValueEnum;
use movrank_engine::{CurrencyTable, MovieTable, RawTable};
use serde_json::{Map, Value};
use tracing::info;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn is_stdout(&self) -> bool {
        matches!(self, Output::Stdout { .. })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }

    pub fn write_text<T>(&mut self, text: &T) -> anyhow::Result<()>
    where
        T: Display + ?Sized,
    {
        write!(&mut *self, "{text}")
            .with_context(|| format!("Failed to write report to {}", self.display_path()))?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// File format of a movie table
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataFormat {
    /// Comma-separated values with a header row
    Csv,
    /// Array of objects keyed by column header
    Json,
}

impl DataFormat {
    /// Guesses the format from the file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DataFormat::Json,
            _ => DataFormat::Csv,
        }
    }
}

/// Read and validate a movie table
///
/// # Arguments
///
/// * `path` - Path to the table file
/// * `format` - Explicit format; guessed from the extension when `None`
///
/// # Errors
///
/// Returns error if the file cannot be read or parsed, or if required
/// columns are missing
pub fn read_movie_table(path: &Path, format: Option<DataFormat>) -> anyhow::Result<MovieTable> {
    let format = format.unwrap_or_else(|| DataFormat::from_path(path));
    let file = File::open(path)
        .with_context(|| format!("Failed to open movie table: {}", path.display()))?;
    let reader = io::BufReader::new(file);
    let raw = match format {
        DataFormat::Csv => read_csv_table(reader),
        DataFormat::Json => read_json_table(reader),
    }
    .with_context(|| format!("Failed to parse movie table: {}", path.display()))?;

    let table = MovieTable::from_raw(&raw)
        .with_context(|| format!("Invalid movie table: {}", path.display()))?;
    info!(path = %path.display(), ?format, records = table.len(), "movie table read");
    Ok(table)
}

pub fn read_csv_table<R>(reader: R) -> anyhow::Result<RawTable>
where
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_owned())
        .collect::<Vec<_>>();

    let mut table = RawTable::new(headers);
    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read CSV record {}", i + 1))?;
        table.push_row(record.iter());
    }
    Ok(table)
}

/// Reads a JSON array of objects.
///
/// Headers are the union of the keys of all rows. `serde_json` objects
/// iterate their keys sorted, so each row's new keys are appended in
/// alphabetical order, not in file order. Headers are matched by name, so
/// column order does not matter. Strings are taken as is, `null` as an
/// empty cell and other values as their JSON text.
pub fn read_json_table<R>(reader: R) -> anyhow::Result<RawTable>
where
    R: Read,
{
    let rows: Vec<Map<String, Value>> =
        serde_json::from_reader(reader).context("Expected a JSON array of objects")?;

    let mut headers = Vec::<String>::new();
    for key in rows.iter().flat_map(Map::keys) {
        if !headers.contains(key) {
            headers.push(key.clone());
        }
    }

    let mut table = RawTable::new(headers.clone());
    for row in &rows {
        table.push_row(headers.iter().map(|h| match row.get(h) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }));
    }
    Ok(table)
}

/// Read the currency table, or the built-in default when no path is given
pub fn read_currencies(path: Option<&Path>) -> anyhow::Result<CurrencyTable> {
    let Some(path) = path else {
        return Ok(CurrencyTable::default());
    };
    let table: CurrencyTable = read_json_file("currency table", path)?;
    validate_currencies(&table)
        .with_context(|| format!("Invalid currency table: {}", path.display()))?;
    info!(path = %path.display(), currencies = table.len(), "currency table read");
    Ok(table)
}

pub fn validate_currencies(table: &CurrencyTable) -> anyhow::Result<()> {
    ensure!(!table.is_empty(), "no currencies defined");
    for (prefix, rate) in table.iter() {
        if !rate.is_finite() || rate < 0.0 {
            bail!("rate of {prefix:?} must be a finite, non-negative number, got {rate}");
        }
    }
    Ok(())
}
