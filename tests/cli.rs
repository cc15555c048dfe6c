//! End-to-end tests for the checker binary.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SAMPLE: &str = "key,fare_amount,pickup_datetime,passenger_count\n\
                      1,-5,2015-05-07 19:52:06 UTC,1\n\
                      2,0,2009-07-17 20:04:56 UTC,1\n\
                      3,2.0,2009-08-24 21:45:00 UTC,1\n\
                      4,2.5,2009-06-26 08:22:21 UTC,3\n\
                      5,10,2014-08-28 17:47:00 UTC,5\n\
                      6,501,2011-02-12 02:27:09 UTC,1\n\
                      7,bad,2014-10-12 07:04:00 UTC,2\n";

const SAMPLE_REPORT: &str = "Negative fares: 1\n\
                             Zero fares: 1\n\
                             Too high (>$500): 1\n\
                             Too low (<$2.50): 3\n\
                             Total implausible: 6\n";

fn checker() -> Command {
    Command::cargo_bin("fare_plausibility_checker").expect("checker binary")
}

fn temp_dir_with(name: &str, contents: &str) -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    fs::write(td.path().join(name), contents).unwrap();
    td
}

#[test]
fn no_args_reads_uber_csv_from_current_dir() {
    let temp = temp_dir_with("uber.csv", SAMPLE);

    checker()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(SAMPLE_REPORT);
}

#[test]
fn explicit_path_is_used() {
    let temp = temp_dir_with("trips.csv", "fare_amount\n600\n7\n");

    checker()
        .arg(temp.path().join("trips.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Too high (>$500): 1"))
        .stdout(predicate::str::contains("Total implausible: 1"));
}

#[test]
fn unparseable_rows_warn_on_stderr_only() {
    let temp = temp_dir_with("uber.csv", SAMPLE);

    checker()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("bad").not())
        .stderr(predicate::str::contains("rows_dropped=1"));
}

#[test]
fn missing_default_file_fails_without_report() {
    let temp = tempfile::tempdir().unwrap();

    checker()
        .current_dir(temp.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("uber.csv"));
}

#[test]
fn missing_fare_column_fails() {
    let temp = temp_dir_with("uber.csv", "key,amount\n1,5\n");

    checker()
        .current_dir(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("fare_amount"));
}

#[test]
fn empty_table_reports_zeros() {
    let temp = temp_dir_with("uber.csv", "key,fare_amount\n");

    checker()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(
            "Negative fares: 0\n\
             Zero fares: 0\n\
             Too high (>$500): 0\n\
             Too low (<$2.50): 0\n\
             Total implausible: 0\n",
        );
}
