//! Interpretation and plain-text reports.
//!
//! Maps numeric results to categorical readings with fixed thresholds and
//! renders the text reports. Rendering is pure; [`write_report`] is the
//! only function that touches the filesystem.
//!
//! | \|r\| | Strength |
//! |-------|----------|
//! | ≥ 0.7 | Strong |
//! | ≥ 0.4 | Moderate |
//! | ≥ 0.2 | Weak |
//! | otherwise | Very weak or no correlation |
//!
//! ```
//! use u_statcalc::report::{decide, interpret_correlation, CorrelationStrength, Decision};
//!
//! assert_eq!(interpret_correlation(-0.75), CorrelationStrength::Strong);
//! assert_eq!(decide(0.01, 0.05), Decision::Reject);
//! ```

use std::fmt;
use std::path::Path;

use tracing::info;

use crate::correlation::CorrelationResult;
use crate::descriptive::{text_histogram, DescriptiveResult, HistogramConfig};
use crate::error::StatError;
use crate::hypothesis::HypothesisResult;

// ── Configuration ─────────────────────────────────────────────────────

/// Configuration for report rendering.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Significance level α. Default: 0.05.
    pub alpha: f64,
    /// Histogram layout.
    pub histogram: HistogramConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            histogram: HistogramConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Sets the significance level.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the histogram layout.
    pub fn histogram(mut self, histogram: HistogramConfig) -> Self {
        self.histogram = histogram;
        self
    }
}

// ── Interpretation ────────────────────────────────────────────────────

/// Strength of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Weak,
    VeryWeak,
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strong => write!(f, "Strong correlation"),
            Self::Moderate => write!(f, "Moderate correlation"),
            Self::Weak => write!(f, "Weak correlation"),
            Self::VeryWeak => write!(f, "Very weak or no correlation"),
        }
    }
}

/// Classifies |r|.
pub fn interpret_correlation(r: f64) -> CorrelationStrength {
    let r = r.abs();
    if r >= 0.7 {
        CorrelationStrength::Strong
    } else if r >= 0.4 {
        CorrelationStrength::Moderate
    } else if r >= 0.2 {
        CorrelationStrength::Weak
    } else {
        CorrelationStrength::VeryWeak
    }
}

/// Decision on the null hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// p < α.
    Reject,
    /// p ≥ α.
    FailToReject,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => write!(f, "Reject the null hypothesis (significant result)"),
            Self::FailToReject => {
                write!(f, "Fail to reject the null hypothesis (not significant)")
            }
        }
    }
}

/// Rejects when `p_value < alpha`.
pub fn decide(p_value: f64, alpha: f64) -> Decision {
    if p_value < alpha {
        Decision::Reject
    } else {
        Decision::FailToReject
    }
}

// ── Rendering ─────────────────────────────────────────────────────────

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{title}")?;
    writeln!(f, "{}\n", "=".repeat(title.chars().count()))
}

fn shape(v: Option<f64>) -> String {
    v.map_or_else(|| "undefined (zero variance)".to_string(), |v| format!("{v:.2}"))
}

struct DescriptiveReport<'a> {
    result: &'a DescriptiveResult,
    config: &'a ReportConfig,
}

impl fmt::Display for DescriptiveReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        heading(f, "STATISTICAL ANALYSIS REPORT")?;

        writeln!(f, "Count: {}", r.count)?;
        writeln!(f, "Min: {}", r.min)?;
        writeln!(f, "Max: {}", r.max)?;
        writeln!(f, "Mean: {:.2} → Average of dataset", r.mean)?;
        writeln!(f, "Median: {} → Middle value", r.median)?;
        writeln!(f, "Mode: {} → Most frequent value", r.mode)?;
        writeln!(f, "Standard Deviation: {:.2} → Spread of data", r.std_dev)?;
        writeln!(f, "Variance: {:.2} → Variability measure", r.variance)?;
        writeln!(
            f,
            "Skewness: {} → Asymmetry (positive = right-skewed)",
            shape(r.skewness)
        )?;
        writeln!(
            f,
            "Kurtosis: {} → Excess tailedness (normal = 0)",
            shape(r.kurtosis)
        )?;

        f.write_str("\nFREQUENCY DISTRIBUTION\n----------------------\n")?;
        for (value, count) in r.frequencies.iter() {
            writeln!(f, "{value}: {count}")?;
        }

        f.write_str("\nHISTOGRAM (Text-Based)\n----------------------\n")?;
        f.write_str(&text_histogram(&r.frequencies, &self.config.histogram))?;

        f.write_str("\nEND OF REPORT\n")
    }
}

struct CorrelationReport<'a> {
    col_a: &'a str,
    col_b: &'a str,
    result: &'a CorrelationResult,
}

impl fmt::Display for CorrelationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        heading(f, "CORRELATION ANALYSIS REPORT")?;

        writeln!(f, "Columns Compared: {} & {}", self.col_a, self.col_b)?;
        writeln!(f, "Pairs: {}", r.sample_size)?;
        writeln!(f, "Pearson Correlation Coefficient: {:.4}", r.coefficient)?;
        if let Some(p) = r.p_value {
            writeln!(f, "P-Value: {p:.4}")?;
        }
        writeln!(f, "Interpretation: {}", interpret_correlation(r.coefficient))?;

        f.write_str("\nEND OF REPORT\n")
    }
}

struct HypothesisReport<'a> {
    result: &'a HypothesisResult,
    config: &'a ReportConfig,
}

impl fmt::Display for HypothesisReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        heading(f, "HYPOTHESIS TESTING REPORT")?;

        writeln!(f, "Test Type: {}", r.test_name())?;
        match r {
            HypothesisResult::OneSampleT {
                population_mean,
                sample_size,
                ..
            } => {
                writeln!(f, "Population Mean: {population_mean}")?;
                writeln!(f, "Sample Size: {sample_size}")?;
            }
            HypothesisResult::TwoSampleT { sizes, .. } => {
                writeln!(f, "Sample Sizes: {} & {}", sizes.0, sizes.1)?;
            }
            HypothesisResult::ChiSquare {
                observed, expected, ..
            } => {
                writeln!(f, "Categories: {}", observed.len())?;
                writeln!(f, "Expected Count per Category: {expected:.2}")?;
            }
        }
        writeln!(f, "Degrees of Freedom: {:.2}", r.df())?;
        writeln!(f, "Test Statistic: {:.4}", r.statistic())?;
        writeln!(f, "P-Value: {:.4}", r.p_value())?;
        writeln!(
            f,
            "Interpretation: {}",
            decide(r.p_value(), self.config.alpha)
        )?;
        writeln!(f, "Alpha (Significance Level): {}", self.config.alpha)?;

        f.write_str("\nEND OF REPORT\n")
    }
}

/// Descriptive statistics report with frequency table and histogram.
pub fn descriptive_report(result: &DescriptiveResult, config: &ReportConfig) -> String {
    DescriptiveReport { result, config }.to_string()
}

/// Correlation report with strength interpretation.
pub fn correlation_report(col_a: &str, col_b: &str, result: &CorrelationResult) -> String {
    CorrelationReport {
        col_a,
        col_b,
        result,
    }
    .to_string()
}

/// Hypothesis test report with the decision at `config.alpha`.
pub fn hypothesis_report(result: &HypothesisResult, config: &ReportConfig) -> String {
    HypothesisReport { result, config }.to_string()
}

/// Writes a rendered report to `path`, replacing any existing file.
pub fn write_report(path: impl AsRef<Path>, text: &str) -> Result<(), StatError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)?;
    info!(path = %path.display(), bytes = text.len(), "report written");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────
