//! Fare Plausibility Checker - Main Application
//!
//! Entry point for the implausible fare detector. All of the work lives in the
//! `fare_plausibility_checker` module of the library crate.
//!
//! # Usage
//!
//! ```bash
//! # Check uber.csv in the current directory
//! $ cargo run --release
//!
//! # Check a specific file
//! $ cargo run --release -- path/to/trips.csv
//! ```

use fare_plausibility_checker::fare_checker_main;

/// call from library
fn main() {
    fare_checker_main();
}
