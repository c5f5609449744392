//! # u-statcalc
//!
//! Statistical calculator engine for tabular data.
//!
//! u-statcalc turns raw, possibly dirty CSV columns into descriptive
//! statistics, Pearson correlations and classical hypothesis tests, and
//! renders the results as plain-text reports.
//!
//! ## Modules
//!
//! - [`table`] — Column-major table of raw string cells (RawColumn, Table)
//! - [`csv_parser`] — CSV reading into a [`Table`](table::Table), flat numeric loading
//! - [`coercion`] — Lenient numeric coercion into immutable [`Sample`](coercion::Sample)s
//! - [`descriptive`] — Mean, median, mode, variance, skewness, kurtosis, frequency table, histogram
//! - [`correlation`] — Pearson correlation between two columns
//! - [`hypothesis`] — One-sample t-test, Welch t-test, chi-square goodness-of-fit
//! - [`report`] — Interpretation thresholds and text reports
//! - [`error`] — Error types
//!
//! ## Quick Start
//!
//! ```
//! use u_statcalc::csv_parser::CsvParser;
//! use u_statcalc::coercion::coerce_column;
//! use u_statcalc::descriptive::describe;
//! use u_statcalc::hypothesis::HypothesisTester;
//!
//! let csv = "score,group\n10,a\n20,b\n20,a\n30,b\n40,a\n";
//! let table = CsvParser::new().parse_str(csv).unwrap();
//!
//! let scores = coerce_column(table.column("score").unwrap()).unwrap();
//! let summary = describe(&scores).unwrap();
//! assert_eq!(summary.mean, 24.0);
//!
//! let chi = HypothesisTester::new(&table).chi_square("group").unwrap();
//! assert!(chi.p_value() > 0.05);
//! ```

pub mod coercion;
pub mod correlation;
pub mod csv_parser;
pub mod descriptive;
pub mod error;
pub mod hypothesis;
pub mod report;
pub mod table;
