//! Error types for u-statcalc.

use thiserror::Error;

/// All errors produced by u-statcalc operations.
///
/// Engine errors are raised at the point of detection; there is no
/// transient failure class, so nothing here is worth retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatError {
    /// A column yielded zero valid numbers after coercion.
    #[error("column '{column}' contains no numeric data")]
    NoNumericData { column: String },
    /// Fewer observations than the statistic or test requires.
    #[error("need at least {min_required} values, got {actual}")]
    InsufficientData { min_required: usize, actual: usize },
    /// Requested column name is absent from the table.
    #[error("column '{name}' not found")]
    ColumnNotFound { name: String },
    /// Two independently cleaned columns have different lengths.
    #[error("columns have different numbers of valid values ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },
    /// Pearson correlation with a zero-variance column.
    #[error("correlation is undefined: column '{column}' has zero variance")]
    UndefinedCorrelation { column: String },
    /// Standardized moment or test statistic with a zero-variance sample.
    #[error("{moment} is undefined for a zero-variance sample")]
    UndefinedMoment { moment: &'static str },

    /// A statistic of finite inputs does not fit in an `f64`.
    #[error("{quantity} exceeds the floating-point range")]
    NumericOverflow { quantity: &'static str },
    /// Input file does not exist.
    #[error("file '{path}' does not exist")]
    FileNotFound { path: String },
    /// Input has no header row.
    #[error("CSV input must contain a header row")]
    MissingHeader,
    /// Header row present but no data rows follow.
    #[error("CSV input contains no data rows")]
    EmptyDataset,
    /// Column length disagrees with the table row count.
    #[error("expected {expected} rows, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    /// I/O error while reading input or writing a report.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StatError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
