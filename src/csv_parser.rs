//! CSV reader producing a [`Table`] of raw string columns.
//!
//! Cells are kept as text. No type inference happens here: the analysis
//! modules decide per call whether a column is read as numbers or as
//! category labels.
//!
//! # Features
//!
//! - RFC 4180 quoting (quoted fields, escaped quotes, delimiters and newlines in fields)
//! - `\n`, `\r\n` and bare `\r` line endings, UTF-8 BOM stripped
//! - Blank lines are skipped
//! - Short rows are padded with empty cells, surplus fields are dropped
//!
//! # Example
//!
//! ```
//! use u_statcalc::csv_parser::CsvParser;
//!
//! let csv = "name,score\nAlice,1.5\nBob,n/a\n";
//! let table = CsvParser::new().parse_str(csv).unwrap();
//! assert_eq!(table.row_count(), 2);
//! assert_eq!(table.column("score").unwrap().values(), &["1.5", "n/a"]);
//! ```

use std::path::Path;

use tracing::{debug, warn};

use crate::coercion::{coerce_values, Sample};
use crate::error::StatError;
use crate::table::{RawColumn, Table};

/// CSV parser configuration and entry point.
///
/// The first non-blank row is always the header.
#[derive(Debug, Clone)]
pub struct CsvParser {
    delimiter: u8,
}

impl CsvParser {
    /// Creates a parser with a comma delimiter.
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Sets the field delimiter (default: comma).
    pub fn delimiter(mut self, delim: u8) -> Self {
        self.delimiter = delim;
        self
    }

    /// Parses CSV text into a table.
    ///
    /// # Errors
    ///
    /// - [`StatError::MissingHeader`] if the input has no rows at all
    /// - [`StatError::EmptyDataset`] if only the header row is present
    pub fn parse_str(&self, input: &str) -> Result<Table, StatError> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        let mut rows = self.parse_raw(input).into_iter();

        let headers = rows.next().ok_or(StatError::MissingHeader)?;
        let data_rows: Vec<Vec<String>> = rows.collect();
        if data_rows.is_empty() {
            return Err(StatError::EmptyDataset);
        }

        let n_cols = headers.len();
        let mut raw_columns: Vec<Vec<String>> = vec![Vec::with_capacity(data_rows.len()); n_cols];
        for (row_idx, mut row) in data_rows.into_iter().enumerate() {
            if row.len() != n_cols {
                warn!(
                    row = row_idx + 2,
                    expected = n_cols,
                    actual = row.len(),
                    "ragged CSV row; padding or truncating"
                );
                row.resize(n_cols, String::new());
            }
            for (col_idx, field) in row.into_iter().enumerate() {
                raw_columns[col_idx].push(field);
            }
        }

        let mut table = Table::new();
        for (name, values) in headers.into_iter().zip(raw_columns) {
            table.add_column(RawColumn::new(name, values))?;
        }
        debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            "parsed CSV table"
        );
        Ok(table)
    }

    /// Parses a CSV file from disk into a table.
    ///
    /// # Errors
    ///
    /// [`StatError::FileNotFound`] if `path` does not exist, otherwise the
    /// errors of [`parse_str`](Self::parse_str).
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Table, StatError> {
        let content = read_existing(path.as_ref())?;
        self.parse_str(&content)
    }

    /// Coerces every cell of the input, header included, into one sample.
    ///
    /// This is the single-series loader: a file holding one column of
    /// numbers (with or without a header) or numbers spread over several
    /// columns all land in one sample, in reading order.
    ///
    /// ```
    /// use u_statcalc::csv_parser::CsvParser;
    ///
    /// let sample = CsvParser::new().numeric_cells("value\n10\n20\nbad\n30\n").unwrap();
    /// assert_eq!(sample.values(), &[10.0, 20.0, 30.0]);
    /// ```
    pub fn numeric_cells(&self, input: &str) -> Result<Sample, StatError> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        let rows = self.parse_raw(input);
        coerce_values("<all cells>", rows.iter().flatten())
    }

    /// File variant of [`numeric_cells`](Self::numeric_cells).
    pub fn numeric_cells_file(&self, path: impl AsRef<Path>) -> Result<Sample, StatError> {
        let content = read_existing(path.as_ref())?;
        self.numeric_cells(&content)
    }

    // ── Internal parsing ─────────────────────────────────────────

    /// Splits raw CSV text into rows of string fields, skipping blank lines.
    fn parse_raw(&self, input: &str) -> Vec<Vec<String>> {
        let delim = self.delimiter as char;
        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut current_row: Vec<String> = Vec::new();
        let mut current_field = String::new();
        let mut in_quotes = false;
        // Set once a quoted field opens so `""` is not mistaken for a blank line.
        let mut row_has_quotes = false;
        let mut chars = input.chars().peekable();

        let mut end_row = |row: &mut Vec<String>, field: &mut String, quoted: &mut bool| {
            row.push(std::mem::take(field));
            let blank = row.len() == 1 && row[0].is_empty() && !*quoted;
            if blank {
                row.clear();
            } else {
                rows.push(std::mem::take(row));
            }
            *quoted = false;
        };

        while let Some(c) = chars.next() {
            if in_quotes {
                if c == '"' {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        current_field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    current_field.push(c);
                }
            } else if c == '"' && current_field.is_empty() {
                in_quotes = true;
                row_has_quotes = true;
            } else if c == delim {
                current_row.push(std::mem::take(&mut current_field));
            } else if c == '\r' {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                end_row(&mut current_row, &mut current_field, &mut row_has_quotes);
            } else if c == '\n' {
                end_row(&mut current_row, &mut current_field, &mut row_has_quotes);
            } else {
                current_field.push(c);
            }
        }

        // Last row without a trailing newline
        if !current_field.is_empty() || !current_row.is_empty() || row_has_quotes {
            end_row(&mut current_row, &mut current_field, &mut row_has_quotes);
        }

        rows
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

fn read_existing(path: &Path) -> Result<String, StatError> {
    if !path.exists() {
        return Err(StatError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

// ── Tests ─────────────────────────────────────────────────────────────
