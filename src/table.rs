//! Column-major table of raw cell values.
//!
//! A [`Table`] holds named [`RawColumn`]s exactly as they came out of the
//! CSV reader: untyped strings, one per row. Interpretation (numeric
//! coercion or category counting) is left to the analysis modules, so a
//! single dirty cell never changes how the rest of a column is read.
//!
//! # Example
//!
//! ```
//! use u_statcalc::table::{RawColumn, Table};
//!
//! let mut table = Table::new();
//! table.add_column(RawColumn::new("score", vec!["1".into(), "2".into()])).unwrap();
//! assert_eq!(table.row_count(), 2);
//! assert!(table.column("score").is_ok());
//! assert!(table.column("missing").is_err());
//! ```

use crate::error::StatError;

// ── RawColumn ─────────────────────────────────────────────────────────

/// A named column of uninterpreted cell values.
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    name: String,
    values: Vec<String>,
}

impl RawColumn {
    /// Creates a column from a name and its cell values.
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Builds a column from anything string-like. Handy for literals.
    pub fn from_strs<S: AsRef<str>>(name: impl Into<String>, values: &[S]) -> Self {
        Self::new(
            name,
            values.iter().map(|v| v.as_ref().to_string()).collect(),
        )
    }

    /// Column name (header text).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw cell values in row order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the column has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ── Table ─────────────────────────────────────────────────────────────

/// Column-major tabular data. All columns have the same number of rows.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<RawColumn>,
    row_count: usize,
}

impl Table {
    /// Creates an empty table with no columns or rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column.
    ///
    /// Returns [`StatError::DimensionMismatch`] if the column length differs
    /// from the existing row count (unless this is the first column).
    pub fn add_column(&mut self, column: RawColumn) -> Result<(), StatError> {
        if self.columns.is_empty() {
            self.row_count = column.len();
        } else if column.len() != self.row_count {
            return Err(StatError::DimensionMismatch {
                expected: self.row_count,
                actual: column.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in header order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// Looks up a column by name.
    ///
    /// Duplicate header names resolve to the first occurrence.
    pub fn column(&self, name: &str) -> Result<&RawColumn, StatError> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| StatError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// Iterates over columns in header order.
    pub fn iter(&self) -> impl Iterator<Item = &RawColumn> {
        self.columns.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
