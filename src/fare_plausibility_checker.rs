//! # Fare Plausibility Checker
//!
//! Reads a CSV of ride-hailing trip records and flags rows whose `fare_amount`
//! is implausible. Four rules are checked independently of each other:
//!
//! - **negative**: fare below zero
//! - **zero**: fare exactly zero
//! - **too high**: fare above $500
//! - **too low**: fare below $2.50
//!
//! The rules are counted, not deduplicated. A negative or zero fare is also
//! below $2.50, so it shows up in two categories, and the reported total is the
//! sum of the four category counts rather than a count of distinct rows.
//!
//! ## Usage
//!
//! ### As a library
//!
//! ```no_run
//! use fare_plausibility_checker::detect_implausible_fares;
//!
//! let counts = detect_implausible_fares("uber.csv")?;
//! assert_eq!(
//!     counts.total_implausible,
//!     counts.negative + counts.zero + counts.too_high + counts.too_low
//! );
//! # Ok::<(), fare_plausibility_checker::FareCheckError>(())
//! ```
//!
//! ### From command line
//!
//! ```bash
//! # Check the default file (uber.csv in the working directory)
//! $ cargo run --release
//!
//! # Check a specific file
//! $ cargo run --release -- path/to/trips.csv
//! ```
//!
//! ## Output
//!
//! ```text
//! Negative fares: 1
//! Zero fares: 1
//! Too high (>$500): 1
//! Too low (<$2.50): 3
//! Total implausible: 6
//! ```

use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use csv::{ByteRecord, ReaderBuilder};
use serde::Serialize;
use tracing::{Level, debug, info, warn};

use crate::error::{FareCheckError, Result};

/// Name of the only column the checker consumes.
pub const FARE_COLUMN: &str = "fare_amount";

/// Input used when no path is given on the command line.
pub const DEFAULT_FILE_PATH: &str = "uber.csv";

/// Fares strictly above this are too high.
pub const TOO_HIGH_THRESHOLD: f64 = 500.0;

/// Fares strictly below this are too low.
pub const TOO_LOW_THRESHOLD: f64 = 2.5;

/// One of the four independent implausibility rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FareCategory {
    Negative,
    Zero,
    TooHigh,
    TooLow,
}

impl FareCategory {
    /// All categories in report order.
    pub const ALL: [FareCategory; 4] = [
        FareCategory::Negative,
        FareCategory::Zero,
        FareCategory::TooHigh,
        FareCategory::TooLow,
    ];

    /// Whether `value` falls under this rule.
    pub fn matches(self, value: f64) -> bool {
        match self {
            FareCategory::Negative => value < 0.0,
            FareCategory::Zero => value == 0.0,
            FareCategory::TooHigh => value > TOO_HIGH_THRESHOLD,
            FareCategory::TooLow => value < TOO_LOW_THRESHOLD,
        }
    }

    /// Wording used for this category's report line.
    pub fn label(self) -> &'static str {
        match self {
            FareCategory::Negative => "Negative fares",
            FareCategory::Zero => "Zero fares",
            FareCategory::TooHigh => "Too high (>$500)",
            FareCategory::TooLow => "Too low (<$2.50)",
        }
    }
}

/// Per-category counts plus their plain sum.
///
/// Serializes as a mapping with the keys `negative`, `zero`, `too_high`,
/// `too_low` and `total_implausible`. `Display` renders the five report lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FareCounts {
    pub negative: u64,
    pub zero: u64,
    pub too_high: u64,
    pub too_low: u64,
    pub total_implausible: u64,
}

impl FareCounts {
    /// Count recorded for a single category.
    pub fn count(&self, category: FareCategory) -> u64 {
        match category {
            FareCategory::Negative => self.negative,
            FareCategory::Zero => self.zero,
            FareCategory::TooHigh => self.too_high,
            FareCategory::TooLow => self.too_low,
        }
    }

    fn count_mut(&mut self, category: FareCategory) -> &mut u64 {
        match category {
            FareCategory::Negative => &mut self.negative,
            FareCategory::Zero => &mut self.zero,
            FareCategory::TooHigh => &mut self.too_high,
            FareCategory::TooLow => &mut self.too_low,
        }
    }
}

impl fmt::Display for FareCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for category in FareCategory::ALL {
            writeln!(f, "{}: {}", category.label(), self.count(category))?;
        }
        writeln!(f, "Total implausible: {}", self.total_implausible)
    }
}

/// The cleaned fare column of one input, with row bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedFares {
    /// Fares that survived coercion, in input order.
    pub values: Vec<f64>,
    /// Data rows read, header excluded.
    pub rows_read: u64,
    /// Rows whose fare was missing or unparseable.
    pub rows_dropped: u64,
}

/// Leniently coerces a raw field to a fare.
///
/// Surrounding whitespace is ignored. Empty text, text that does not parse as
/// a float, and `NaN` all yield `None`; they are missing values, never errors.
pub fn coerce_fare(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| !value.is_nan())
}

/// Reads a headered CSV fully into memory and returns its cleaned fare column.
///
/// Rows are read as raw bytes so that stray non-UTF-8 bytes in unrelated
/// columns do not fail the load; a non-UTF-8 fare field is simply unparseable.
/// A row shorter than the header is padded with missing values, so a short row
/// that stops before the fare column is dropped like any other missing fare.
///
/// # Errors
///
/// * [`FareCheckError::Load`] if the data cannot be read as CSV.
/// * [`FareCheckError::Malformed`] if there is no header row (empty input) or a
///   row has more fields than the header.
/// * [`FareCheckError::MissingColumn`] if no header is named `fare_amount`.
pub fn load_fare_amounts<R: io::Read>(reader: R) -> Result<LoadedFares> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    // Locate the fare column in the header row
    let headers = reader.byte_headers().map_err(FareCheckError::load)?;
    if headers.is_empty() {
        return Err(FareCheckError::malformed("no columns to parse"));
    }
    let header_len = headers.len();
    let column_index = headers
        .iter()
        .position(|name| name == FARE_COLUMN.as_bytes())
        .ok_or(FareCheckError::MissingColumn {
            column: FARE_COLUMN,
        })?;

    let mut loaded = LoadedFares::default();
    let mut record = ByteRecord::new();

    // Stream every data row, keeping only fares that coerce
    while reader
        .read_byte_record(&mut record)
        .map_err(FareCheckError::load)?
    {
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        if record.len() > header_len {
            return Err(FareCheckError::malformed(format!(
                "line {line}: expected {header_len} fields, saw {}",
                record.len()
            )));
        }

        loaded.rows_read += 1;

        // Short rows have no field here and count as missing
        let fare = record
            .get(column_index)
            .and_then(|field| std::str::from_utf8(field).ok())
            .and_then(coerce_fare);

        match fare {
            Some(value) => loaded.values.push(value),
            None => {
                loaded.rows_dropped += 1;
                debug!(
                    line,
                    raw = %String::from_utf8_lossy(record.get(column_index).unwrap_or_default()),
                    "dropping row with unparseable fare"
                );
            }
        }
    }

    Ok(loaded)
}

/// Opens `path` and loads its fare column. The file is closed before returning.
pub fn load_fare_amounts_from_path(path: impl AsRef<Path>) -> Result<LoadedFares> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|err| FareCheckError::load(csv::Error::from(err)).with_path(path))?;
    load_fare_amounts(io::BufReader::new(file)).map_err(|err| err.with_path(path))
}

/// Counts each rule independently over `values`.
///
/// `total_implausible` is the sum of the four counts, so a value matching two
/// rules contributes twice.
pub fn classify_fares(values: &[f64]) -> FareCounts {
    let mut counts = FareCounts::default();

    for &value in values {
        for category in FareCategory::ALL {
            if category.matches(value) {
                *counts.count_mut(category) += 1;
            }
        }
    }

    counts.total_implausible = counts.negative + counts.zero + counts.too_high + counts.too_low;
    counts
}

/// Loads `file_path`, classifies its fares, prints the report and returns the counts.
///
/// Nothing is printed if loading fails; the error is returned as is. A failed
/// write to stdout is reported as [`FareCheckError::Report`].
///
/// # Example
///
/// ```no_run
/// use fare_plausibility_checker::detect_implausible_fares;
///
/// let counts = detect_implausible_fares("data/trips.csv")?;
/// println!("{}", counts.too_high);
/// # Ok::<(), fare_plausibility_checker::FareCheckError>(())
/// ```
pub fn detect_implausible_fares(file_path: impl AsRef<Path>) -> Result<FareCounts> {
    let file_path = file_path.as_ref();

    // Load and clean the fare column before anything is printed
    let loaded = load_fare_amounts_from_path(file_path)?;

    info!(
        path = %file_path.display(),
        rows_read = loaded.rows_read,
        rows_kept = loaded.values.len(),
        "loaded trip records"
    );
    if loaded.rows_dropped > 0 {
        warn!(
            path = %file_path.display(),
            rows_dropped = loaded.rows_dropped,
            "ignored rows with missing or unparseable {FARE_COLUMN}"
        );
    }

    let counts = classify_fares(&loaded.values);

    // Print the report; write failures propagate
    let mut stdout = io::stdout().lock();
    write!(stdout, "{counts}")
        .and_then(|()| stdout.flush())
        .map_err(|source| FareCheckError::Report { source })?;

    Ok(counts)
}

/// Command line for the checker: one optional input path, nothing else.
#[derive(Debug, Parser)]
#[command(version, about = "Flag implausible fare amounts in a trip records CSV")]
struct Cli {
    /// Path to the trip records CSV
    #[arg(default_value = DEFAULT_FILE_PATH)]
    file_path: PathBuf,
}

fn init_logging() {
    // stdout is reserved for the report
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .try_init();
}

/// Main entry point for the fare plausibility checker binary.
///
/// Parses the optional file path (default `uber.csv`), runs the check and
/// exits with status 1 if the input cannot be loaded or the report cannot
/// be written.
///
/// # Examples
///
/// ```bash
/// # Check uber.csv in the current directory
/// fare_plausibility_checker
///
/// # Check another file
/// fare_plausibility_checker ./data/trips_2015.csv
/// ```
pub fn fare_checker_main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(err) = detect_implausible_fares(&cli.file_path) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
