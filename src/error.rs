//! Error taxonomy for the fare plausibility checker.
//!
//! Only table-level problems are errors. A fare that fails numeric coercion is
//! not an error at all: it is treated as missing and dropped before counting.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions that abort a check before any report is printed.
#[derive(Debug, Error)]
pub enum FareCheckError {
    /// The input could not be opened, read, or parsed as a CSV table.
    #[error("failed to load trip records{}: {source}", display_path(.path))]
    Load {
        path: Option<PathBuf>,
        #[source]
        source: csv::Error,
    },

    /// The input is readable CSV but not a usable table: it has no header
    /// row at all, or a data row carries more fields than the header names.
    #[error("malformed trip records{}: {reason}", display_path(.path))]
    Malformed {
        path: Option<PathBuf>,
        reason: String,
    },

    /// The header row does not name the required column.
    #[error("required column '{column}' not found in header row")]
    MissingColumn { column: &'static str },

    /// The report could not be written to stdout.
    #[error("failed to write report: {source}")]
    Report {
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FareCheckError>;

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" from {}", path.display()),
        None => String::new(),
    }
}

impl FareCheckError {
    pub(crate) fn load(source: csv::Error) -> Self {
        FareCheckError::Load { path: None, source }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        FareCheckError::Malformed {
            path: None,
            reason: reason.into(),
        }
    }

    /// Attaches the input path to a load error that was raised without one.
    pub(crate) fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            FareCheckError::Load { path: None, source } => FareCheckError::Load {
                path: Some(path.into()),
                source,
            },
            FareCheckError::Malformed { path: None, reason } => FareCheckError::Malformed {
                path: Some(path.into()),
                reason,
            },
            other => other,
        }
    }
}
