//! Numeric coercion: raw cells to validated samples.
//!
//! Coercion is deliberately lenient. Each cell is trimmed and parsed as a
//! floating-point number; cells that do not parse (words, empty strings,
//! `NaN`, infinities) are skipped rather than reported, so one malformed
//! cell does not abort an otherwise valid analysis. Only a column that
//! yields nothing at all is an error.
//!
//! ```
//! use u_statcalc::coercion::coerce_column;
//! use u_statcalc::table::RawColumn;
//!
//! let col = RawColumn::from_strs("x", &["1", " 2.5 ", "n/a", "", "-3"]);
//! let sample = coerce_column(&col).unwrap();
//! assert_eq!(sample.values(), &[1.0, 2.5, -3.0]);
//! ```

use tracing::debug;

use crate::error::StatError;
use crate::table::RawColumn;

// ── Sample ────────────────────────────────────────────────────────────

/// Cleaned, immutable sequence of finite numbers from one column.
///
/// Always non-empty. Statistics that need more than one observation check
/// the length themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Wraps already-numeric data.
    ///
    /// # Errors
    ///
    /// - [`StatError::NoNumericData`] if `values` is empty or any value is
    ///   NaN or infinite (named `"<values>"` in the error).
    pub fn from_values(values: Vec<f64>) -> Result<Self, StatError> {
        if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
            return Err(StatError::NoNumericData {
                column: "<values>".to_string(),
            });
        }
        Ok(Self { values })
    }

    /// The observations in their original order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations (at least 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest observation.
    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest observation.
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Fails with [`StatError::InsufficientData`] below `min_required`.
    pub(crate) fn require(&self, min_required: usize) -> Result<(), StatError> {
        if self.len() < min_required {
            return Err(StatError::InsufficientData {
                min_required,
                actual: self.len(),
            });
        }
        Ok(())
    }
}

// ── Coercion ──────────────────────────────────────────────────────────

/// Parses a single cell. Surrounding whitespace is ignored; non-finite
/// results are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerces a raw column into a sample.
///
/// # Errors
///
/// [`StatError::NoNumericData`] if no cell parses.
pub fn coerce_column(column: &RawColumn) -> Result<Sample, StatError> {
    coerce_values(column.name(), column.values())
}

/// Coerces arbitrary string-like cells into a sample, naming the source
/// `label` in errors.
pub fn coerce_values<I, S>(label: &str, cells: I) -> Result<Sample, StatError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = 0usize;
    let values: Vec<f64> = cells
        .into_iter()
        .inspect(|_| seen += 1)
        .filter_map(|cell| parse_number(cell.as_ref()))
        .collect();

    debug!(
        column = label,
        kept = values.len(),
        dropped = seen - values.len(),
        "coerced column"
    );

    if values.is_empty() {
        return Err(StatError::NoNumericData {
            column: label.to_string(),
        });
    }
    Ok(Sample { values })
}

// ── Tests ─────────────────────────────────────────────────────────────
