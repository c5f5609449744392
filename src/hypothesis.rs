//! Classical hypothesis tests.
//!
//! - One-sample t-test against a population mean
//! - Welch's two-sample t-test (unequal variances)
//! - Chi-square goodness-of-fit against a uniform expectation
//!
//! All tests return a [`HypothesisResult`] with a two-tailed (t-tests) or
//! upper-tail (chi-square) p-value in [0, 1]. Column-level entry points
//! live on [`HypothesisTester`].
//!
//! ```
//! use u_statcalc::coercion::Sample;
//! use u_statcalc::hypothesis::one_sample_t_test;
//!
//! let data = Sample::from_values(vec![5.0, 7.0, 9.0, 6.0, 8.0]).unwrap();
//! let result = one_sample_t_test(&data, 6.0).unwrap();
//! assert!((result.statistic() - 1.414_213_562).abs() < 1e-6);
//! assert!(result.p_value() > 0.05);
//! ```

use std::collections::HashMap;

use tracing::debug;
use u_numflow::special;

use crate::coercion::{coerce_column, Sample};
use crate::descriptive::{self, FrequencyTable};
use crate::error::StatError;
use crate::table::{RawColumn, Table};

// ── Result ────────────────────────────────────────────────────────────

/// Outcome of a hypothesis test, tagged by test kind.
#[derive(Debug, Clone, PartialEq)]
pub enum HypothesisResult {
    /// One-sample t-test, H₀: μ = `population_mean`.
    OneSampleT {
        statistic: f64,
        p_value: f64,
        df: f64,
        population_mean: f64,
        sample_size: usize,
    },
    /// Welch two-sample t-test, H₀: μ₁ = μ₂.
    TwoSampleT {
        statistic: f64,
        p_value: f64,
        /// Welch–Satterthwaite degrees of freedom (fractional).
        df: f64,
        sizes: (usize, usize),
    },
    /// Chi-square goodness-of-fit against equal category frequencies.
    ChiSquare {
        statistic: f64,
        p_value: f64,
        df: f64,
        /// Observed count per category, in table order.
        observed: Vec<usize>,
        /// Expected count of every category (total / categories).
        expected: f64,
    },
}

impl HypothesisResult {
    /// Test statistic (t or χ²).
    pub fn statistic(&self) -> f64 {
        match self {
            Self::OneSampleT { statistic, .. }
            | Self::TwoSampleT { statistic, .. }
            | Self::ChiSquare { statistic, .. } => *statistic,
        }
    }

    /// p-value in [0, 1].
    pub fn p_value(&self) -> f64 {
        match self {
            Self::OneSampleT { p_value, .. }
            | Self::TwoSampleT { p_value, .. }
            | Self::ChiSquare { p_value, .. } => *p_value,
        }
    }

    /// Degrees of freedom.
    pub fn df(&self) -> f64 {
        match self {
            Self::OneSampleT { df, .. } | Self::TwoSampleT { df, .. } | Self::ChiSquare { df, .. } => {
                *df
            }
        }
    }

    /// Human-readable test name.
    pub fn test_name(&self) -> &'static str {
        match self {
            Self::OneSampleT { .. } => "One-sample t-test",
            Self::TwoSampleT { .. } => "Welch two-sample t-test",
            Self::ChiSquare { .. } => "Chi-square goodness-of-fit test",
        }
    }
}

/// Two-tailed p-value of a t statistic.
fn t_two_tailed(t: f64, df: f64) -> f64 {
    (2.0 * (1.0 - special::t_distribution_cdf(t.abs(), df))).clamp(0.0, 1.0)
}

// ── t-tests ───────────────────────────────────────────────────────────

/// One-sample t-test: t = (x̄ − μ₀) / (s / √n), df = n − 1.
///
/// # Errors
///
/// - [`StatError::InsufficientData`] if fewer than 2 values
/// - [`StatError::UndefinedMoment`] if the sample is constant (zero
///   standard error)
/// - [`StatError::NumericOverflow`] if t exceeds the `f64` range
pub fn one_sample_t_test(
    sample: &Sample,
    population_mean: f64,
) -> Result<HypothesisResult, StatError> {
    let sd = descriptive::standard_deviation(sample)?;
    if sd == 0.0 {
        return Err(zero_standard_error());
    }

    let n = sample.len() as f64;
    let statistic = finite_t((descriptive::mean(sample) - population_mean) / (sd / n.sqrt()))?;
    let df = n - 1.0;

    Ok(HypothesisResult::OneSampleT {
        statistic,
        p_value: t_two_tailed(statistic, df),
        df,
        population_mean,
        sample_size: sample.len(),
    })
}

/// Welch's t-test: t = (x̄₁ − x̄₂) / √(s₁²/n₁ + s₂²/n₂), with
/// Welch–Satterthwaite degrees of freedom.
///
/// # Errors
///
/// - [`StatError::InsufficientData`] if either sample has fewer than 2 values
/// - [`StatError::UndefinedMoment`] if both samples are constant
/// - [`StatError::NumericOverflow`] if t exceeds the `f64` range
pub fn two_sample_t_test(a: &Sample, b: &Sample) -> Result<HypothesisResult, StatError> {
    let (n1, n2) = (a.len() as f64, b.len() as f64);
    // Per-sample standard errors s/√n, combined with hypot so that squaring
    // neither overflows nor underflows.
    let e1 = descriptive::standard_deviation(a)? / n1.sqrt();
    let e2 = descriptive::standard_deviation(b)? / n2.sqrt();
    let se = e1.hypot(e2);
    if se == 0.0 {
        return Err(zero_standard_error());
    }

    let statistic = finite_t((descriptive::mean(a) - descriptive::mean(b)) / se)?;
    // Satterthwaite: se⁴ / (e1⁴/(n1 − 1) + e2⁴/(n2 − 1)), in units of se.
    let (r1, r2) = (e1 / se, e2 / se);
    let df = 1.0 / (r1.powi(4) / (n1 - 1.0) + r2.powi(4) / (n2 - 1.0));

    Ok(HypothesisResult::TwoSampleT {
        statistic,
        p_value: t_two_tailed(statistic, df),
        df,
        sizes: (a.len(), b.len()),
    })
}

fn zero_standard_error() -> StatError {
    StatError::UndefinedMoment {
        moment: "t statistic",
    }
}

fn finite_t(t: f64) -> Result<f64, StatError> {
    if t.is_finite() {
        Ok(t)
    } else {
        Err(StatError::NumericOverflow {
            quantity: "t statistic",
        })
    }
}

// ── Chi-square ────────────────────────────────────────────────────────

/// Counts trimmed, non-empty cell labels in first-seen order.
///
/// Cells are treated as labels, not numbers: `"1"` and `"1.0"` are
/// different categories.
///
/// ```
/// use u_statcalc::hypothesis::extract_categories;
/// use u_statcalc::table::RawColumn;
///
/// let col = RawColumn::from_strs("answer", &["Yes", " No", "", "Yes "]);
/// let table = extract_categories(&col);
/// assert_eq!(table.count_of(&"Yes".to_string()), 2);
/// assert_eq!(table.count_of(&"No".to_string()), 1);
/// assert_eq!(table.total(), 3);
/// ```
pub fn extract_categories(column: &RawColumn) -> FrequencyTable<String> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<(String, usize)> = Vec::new();

    for cell in column.values() {
        let label = cell.trim();
        if label.is_empty() {
            continue;
        }
        match index.get(label) {
            Some(&i) => entries[i].1 += 1,
            None => {
                index.insert(label, entries.len());
                entries.push((label.to_string(), 1));
            }
        }
    }
    FrequencyTable::from_entries(entries)
}

/// Chi-square goodness-of-fit against a uniform expectation.
///
/// The counts are read as one observed row; each category is expected to
/// hold `total / k`. χ² = Σ (O − E)² / E with df = k − 1.
///
/// # Errors
///
/// [`StatError::InsufficientData`] if fewer than 2 categories.
pub fn chi_square_test<K>(observed: &FrequencyTable<K>) -> Result<HypothesisResult, StatError> {
    let k = observed.len();
    if k < 2 {
        return Err(StatError::InsufficientData {
            min_required: 2,
            actual: k,
        });
    }

    let counts = observed.counts();
    let expected = observed.total() as f64 / k as f64;
    let statistic: f64 = counts
        .iter()
        .map(|&o| (o as f64 - expected).powi(2) / expected)
        .sum();
    let df = (k - 1) as f64;
    let p_value = (1.0 - special::chi_squared_cdf(statistic, df)).clamp(0.0, 1.0);

    Ok(HypothesisResult::ChiSquare {
        statistic,
        p_value,
        df,
        observed: counts,
        expected,
    })
}

// ── Column-level driver ───────────────────────────────────────────────

/// Runs tests against named columns of a table.
///
/// Each column is extracted and cleaned independently.
#[derive(Debug, Clone, Copy)]
pub struct HypothesisTester<'a> {
    table: &'a Table,
}

impl<'a> HypothesisTester<'a> {
    /// Wraps a table.
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    fn sample(&self, name: &str) -> Result<Sample, StatError> {
        coerce_column(self.table.column(name)?)
    }

    /// One-sample t-test of `column` against `population_mean`.
    pub fn one_sample(
        &self,
        column: &str,
        population_mean: f64,
    ) -> Result<HypothesisResult, StatError> {
        let sample = self.sample(column)?;
        debug!(column, n = sample.len(), population_mean, "one-sample t-test");
        one_sample_t_test(&sample, population_mean)
    }

    /// Welch t-test comparing two columns.
    pub fn two_sample(&self, col_a: &str, col_b: &str) -> Result<HypothesisResult, StatError> {
        let a = self.sample(col_a)?;
        let b = self.sample(col_b)?;
        debug!(col_a, col_b, n_a = a.len(), n_b = b.len(), "two-sample t-test");
        two_sample_t_test(&a, &b)
    }

    /// Category counts of `column`.
    pub fn categories(&self, column: &str) -> Result<FrequencyTable<String>, StatError> {
        Ok(extract_categories(self.table.column(column)?))
    }

    /// Chi-square test over the categories of `column`.
    pub fn chi_square(&self, column: &str) -> Result<HypothesisResult, StatError> {
        let observed = self.categories(column)?;
        debug!(column, categories = observed.len(), "chi-square test");
        chi_square_test(&observed)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
