//! Command-line tests: each subcommand on a temporary CSV file.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const DATA: &str = "\
X,Y,SampleA,SampleB,Category
1,10,5,4,Yes
2,20,7,5,No
3,30,9,6,Yes
4,40,6,7,Yes
,,8,5,No
,,,,No
";

fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn statcalc() -> Command {
    assert_cmd::cargo::cargo_bin_cmd!("u-statcalc")
}

// ── Subcommands ──────────────────────────────────────────────────────

#[test]
fn test_describe_column() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path(), "data.csv", DATA);

    statcalc()
        .arg("describe")
        .arg(&data)
        .args(["--column", "SampleA"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("STATISTICAL ANALYSIS REPORT"))
        .stdout(predicate::str::contains("Count: 5\n"))
        .stdout(predicate::str::contains("Mean: 7.00"))
        .stdout(predicate::str::contains("END OF REPORT"));
}

#[test]
fn test_describe_all_numeric_cells() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path(), "data.csv", DATA);

    // X and Y have 4 numbers each, SampleA and SampleB 5 each
    statcalc()
        .arg("describe")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Count: 18\n"));
}

#[test]
fn test_correlate() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path(), "data.csv", DATA);

    statcalc()
        .arg("correlate")
        .arg(&data)
        .args(["X", "Y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Columns Compared: X & Y"))
        .stdout(predicate::str::contains(
            "Pearson Correlation Coefficient: 1.0000",
        ))
        .stdout(predicate::str::contains("Interpretation: Strong correlation"));
}

#[test]
fn test_correlate_pairwise() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path(), "gaps.csv", "a,b\n1,4\nx,5\n3,6\n");

    statcalc()
        .arg("correlate")
        .arg(&data)
        .args(["a", "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("(2 vs 3)"));

    statcalc()
        .arg("correlate")
        .arg(&data)
        .args(["a", "b", "--pairwise"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pairs: 2\n"));
}

#[test]
fn test_ttest() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path(), "data.csv", DATA);

    statcalc()
        .arg("ttest")
        .arg(&data)
        .args(["SampleA", "--mu", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Test Type: One-sample t-test"))
        .stdout(predicate::str::contains("Population Mean: 6\n"))
        .stdout(predicate::str::contains("Test Statistic: 1.4142"))
        .stdout(predicate::str::contains("Fail to reject"));
}

#[test]
fn test_welch_with_alpha() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path(), "data.csv", DATA);

    // p ≈ 0.107
    statcalc()
        .arg("welch")
        .arg(&data)
        .args(["SampleA", "SampleB"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Test Type: Welch two-sample t-test"))
        .stdout(predicate::str::contains("Sample Sizes: 5 & 5"))
        .stdout(predicate::str::contains("Fail to reject"));

    statcalc()
        .arg("welch")
        .arg(&data)
        .args(["SampleA", "SampleB", "--alpha", "0.2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reject the null hypothesis"))
        .stdout(predicate::str::contains("Alpha (Significance Level): 0.2"));
}

#[test]
fn test_chisq() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path(), "data.csv", DATA);

    statcalc()
        .arg("chisq")
        .arg(&data)
        .arg("Category")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chi-square goodness-of-fit test"))
        .stdout(predicate::str::contains("Categories: 2\n"))
        .stdout(predicate::str::contains("Expected Count per Category: 3.00"))
        .stdout(predicate::str::contains("Test Statistic: 0.0000"));
}

// ── Global options ───────────────────────────────────────────────────

#[test]
fn test_report_written_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path(), "data.csv", DATA);
    let report = dir.path().join("results").join("analysis_report.txt");

    let output = statcalc()
        .arg("chisq")
        .arg(&data)
        .arg("Category")
        .arg("--report")
        .arg(&report)
        .output()
        .unwrap();
    assert!(output.status.success());

    let written = fs::read_to_string(&report).unwrap();
    assert_eq!(written, String::from_utf8(output.stdout).unwrap());
    assert!(written.starts_with("HYPOTHESIS TESTING REPORT"));
}

#[test]
fn test_delimiter() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path(), "semi.csv", "x;y\n1;2\n2;4\n3;7\n");

    statcalc()
        .args(["--delimiter", ";"])
        .arg("correlate")
        .arg(&data)
        .args(["x", "y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pairs: 3\n"));
}

#[test]
fn test_alpha_out_of_range_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path(), "data.csv", DATA);

    statcalc()
        .args(["--alpha", "1.5"])
        .arg("chisq")
        .arg(&data)
        .arg("Category")
        .assert()
        .failure()
        .stderr(predicate::str::contains("alpha must be between 0 and 1"));
}

#[test]
fn test_non_ascii_delimiter_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path(), "data.csv", DATA);

    statcalc()
        .args(["--delimiter", "§"])
        .arg("describe")
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("single ASCII character"));
}

// ── Engine errors ────────────────────────────────────────────────────

#[test]
fn test_missing_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path(), "data.csv", DATA);

    statcalc()
        .arg("ttest")
        .arg(&data)
        .arg("Nope")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("column 'Nope' not found"));
}

#[test]
fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    statcalc()
        .arg("describe")
        .arg(dir.path().join("absent.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_constant_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path(), "flat.csv", "a,b\n1,3\n2,3\n3,3\n");

    statcalc()
        .arg("correlate")
        .arg(&data)
        .args(["a", "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("column 'b' has zero variance"));
}
