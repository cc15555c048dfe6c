//! Fare plausibility checks for ride-hailing trip record CSVs.
//!
//! See [`fare_plausibility_checker`] for the rules and the report format.

pub mod error;
pub mod fare_plausibility_checker;

pub use error::{FareCheckError, Result};
pub use fare_plausibility_checker::{
    DEFAULT_FILE_PATH, FARE_COLUMN, FareCategory, FareCounts, LoadedFares, TOO_HIGH_THRESHOLD,
    TOO_LOW_THRESHOLD, classify_fares, coerce_fare, detect_implausible_fares, fare_checker_main,
    load_fare_amounts, load_fare_amounts_from_path,
};
