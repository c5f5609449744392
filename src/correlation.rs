//! Pearson correlation between two numeric columns.
//!
//! Columns are coerced to samples (see [`coercion`](crate::coercion)) and
//! then compared. How rows are paired is controlled by [`Alignment`]:
//!
//! - [`Alignment::Independent`] (default) cleans each column on its own.
//!   If the columns have unparsable cells in different rows the surviving
//!   values no longer line up; a length difference is reported as
//!   [`StatError::LengthMismatch`], but equal-length misalignment is not
//!   detectable.
//! - [`Alignment::Pairwise`] keeps only rows where both cells parse, so
//!   pairs always come from the same row.
//!
//! A column with zero variance makes the coefficient undefined and fails
//! with [`StatError::UndefinedCorrelation`].
//!
//! ```
//! use u_statcalc::correlation::{correlate_columns, CorrelationConfig};
//! use u_statcalc::table::{RawColumn, Table};
//!
//! let mut table = Table::new();
//! table.add_column(RawColumn::from_strs("x", &["1", "2", "3", "4"])).unwrap();
//! table.add_column(RawColumn::from_strs("y", &["10", "20", "30", "40"])).unwrap();
//!
//! let r = correlate_columns(&table, "x", "y", &CorrelationConfig::default()).unwrap();
//! assert!((r.coefficient - 1.0).abs() < 1e-4);
//! assert_eq!(r.sample_size, 4);
//! ```

use tracing::debug;
use u_numflow::stats;

use crate::coercion::{coerce_column, parse_number, Sample};
use crate::descriptive::unit_scaled;
use crate::error::StatError;
use crate::table::{RawColumn, Table};

// ── Configuration ─────────────────────────────────────────────────────

/// How two columns are paired before correlating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Clean each column separately and compare the resulting samples.
    #[default]
    Independent,
    /// Drop every row where either cell fails to parse.
    Pairwise,
}

/// Configuration for column correlation.
#[derive(Debug, Clone, Default)]
pub struct CorrelationConfig {
    /// Row pairing policy. Default: [`Alignment::Independent`].
    pub alignment: Alignment,
}

impl CorrelationConfig {
    /// Sets the row pairing policy.
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

// ── Result ────────────────────────────────────────────────────────────

/// Result of a Pearson correlation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationResult {
    /// Pearson r, clamped to [-1, 1].
    pub coefficient: f64,
    /// Number of pairs used.
    pub sample_size: usize,
    /// Two-tailed p-value for H₀: ρ = 0 (t-approximation, df = n − 2).
    /// `None` for fewer than 3 pairs.
    pub p_value: Option<f64>,
}

// ── Computation ───────────────────────────────────────────────────────

/// Pearson correlation of two equal-length samples.
///
/// # Errors
///
/// - [`StatError::LengthMismatch`] if the lengths differ
/// - [`StatError::InsufficientData`] if fewer than 2 pairs
/// - [`StatError::UndefinedCorrelation`] if either sample is constant
///   (named `"x"` or `"y"`)
pub fn pearson(x: &Sample, y: &Sample) -> Result<CorrelationResult, StatError> {
    pearson_named(("x", x), ("y", y))
}

fn pearson_named(
    (x_name, x): (&str, &Sample),
    (y_name, y): (&str, &Sample),
) -> Result<CorrelationResult, StatError> {
    if x.len() != y.len() {
        return Err(StatError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    x.require(2)?;

    // r is unchanged by rescaling either variable; on values in [-1, 1] the
    // moment sums can neither overflow nor underflow.
    let (zx, sx) = rescaled(x_name, x)?;
    let (zy, sy) = rescaled(y_name, y)?;

    if let Some(r) = u_analytics::correlation::pearson(&zx, &zy) {
        return Ok(CorrelationResult {
            coefficient: r.r,
            sample_size: r.n,
            p_value: Some(r.p_value),
        });
    }

    // u-analytics needs 3 pairs; two points always lie on a line.
    let cov = stats::covariance(&zx, &zy)
        .filter(|c| c.is_finite())
        .ok_or(StatError::InsufficientData {
            min_required: 2,
            actual: x.len(),
        })?;
    Ok(CorrelationResult {
        coefficient: (cov / (sx * sy)).clamp(-1.0, 1.0),
        sample_size: x.len(),
        p_value: None,
    })
}

/// Values divided by their largest magnitude, with their standard
/// deviation. Fails with [`StatError::UndefinedCorrelation`] when the
/// sample has no spread.
fn rescaled(name: &str, sample: &Sample) -> Result<(Vec<f64>, f64), StatError> {
    let undefined = || StatError::UndefinedCorrelation {
        column: name.to_string(),
    };
    let v = sample.values();
    if v.iter().all(|&a| a == v[0]) {
        return Err(undefined());
    }
    let z = unit_scaled(v).ok_or_else(undefined)?;
    match stats::std_dev(&z) {
        Some(sd) if sd > 0.0 && sd.is_finite() => Ok((z, sd)),
        _ => Err(undefined()),
    }
}

/// Correlates two named columns of `table`.
///
/// # Errors
///
/// - [`StatError::ColumnNotFound`] if either name is absent
/// - [`StatError::NoNumericData`] if a column has no numeric cells
/// - plus the errors of [`pearson`], with column names in
///   [`StatError::UndefinedCorrelation`]
pub fn correlate_columns(
    table: &Table,
    col_a: &str,
    col_b: &str,
    config: &CorrelationConfig,
) -> Result<CorrelationResult, StatError> {
    let a = table.column(col_a)?;
    let b = table.column(col_b)?;

    let (x, y) = match config.alignment {
        Alignment::Independent => (coerce_column(a)?, coerce_column(b)?),
        Alignment::Pairwise => paired_samples(a, b)?,
    };

    debug!(
        col_a,
        col_b,
        alignment = ?config.alignment,
        n_a = x.len(),
        n_b = y.len(),
        "correlating columns"
    );

    pearson_named((col_a, &x), (col_b, &y))
}

/// Keeps rows where both cells parse.
fn paired_samples(a: &RawColumn, b: &RawColumn) -> Result<(Sample, Sample), StatError> {
    // Surface a wholly non-numeric column the same way independent cleaning does.
    coerce_column(a)?;
    coerce_column(b)?;

    let (xs, ys): (Vec<f64>, Vec<f64>) = a
        .values()
        .iter()
        .zip(b.values())
        .filter_map(|(va, vb)| Some((parse_number(va)?, parse_number(vb)?)))
        .unzip();

    if xs.is_empty() {
        return Err(StatError::InsufficientData {
            min_required: 2,
            actual: 0,
        });
    }
    Ok((Sample::from_values(xs)?, Sample::from_values(ys)?))
}

// ── Tests ─────────────────────────────────────────────────────────────
