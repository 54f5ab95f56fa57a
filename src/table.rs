//! Table model produced by the CSV decoder

use crate::csv::CsvParser;
use crate::error::{Result, SchedError};

/// An ordered sequence of rows, each an ordered sequence of string fields
///
/// Row and column positions are meaningful: the first row is the header in
/// the intended use. The decoder does not enforce equal row widths, so a
/// `Table` may be ragged until [`validate_rectangular`](Table::validate_rectangular)
/// has been run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Wrap decoded rows
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Table { rows }
    }

    /// Decode CSV text into a table
    ///
    /// Never fails; see [`CsvParser::parse_document`] for the exact
    /// permissive semantics.
    pub fn from_csv(input: &str) -> Self {
        Table::new(CsvParser::default().parse_document(input))
    }

    /// All rows, in input order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// The header row, if the table has any rows
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(|r| r.as_slice())
    }

    /// Field at (row, col), if present
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col)).map(|f| f.as_str())
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Widest row length
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// True when the table holds no non-empty field
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.iter().all(|f| f.is_empty()))
    }

    /// Drop trailing rows whose every field is empty
    ///
    /// Spreadsheet exports end with a newline, which the decoder turns
    /// into a final `[""]` row. Stripping such rows here keeps the decoder
    /// untouched while letting the schedule layer see the grid it expects.
    pub fn trim_trailing_blank_rows(&mut self) {
        while let Some(last) = self.rows.last() {
            if last.iter().all(|f| f.is_empty()) {
                self.rows.pop();
            } else {
                break;
            }
        }
    }

    /// Strict validation pass: every row must match the header's width
    ///
    /// The decoder is permissive by design, so raggedness is only an error
    /// for callers that opt in by calling this. The first offending row is
    /// reported with its index and the expected vs. actual field counts.
    pub fn validate_rectangular(&self) -> Result<()> {
        let expected = match self.rows.first() {
            Some(header) => header.len(),
            None => return Ok(()),
        };
        for (row, fields) in self.rows.iter().enumerate() {
            if fields.len() != expected {
                return Err(SchedError::MalformedTable {
                    row,
                    expected,
                    actual: fields.len(),
                });
            }
        }
        Ok(())
    }
}

impl From<Vec<Vec<String>>> for Table {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Table::new(rows)
    }
}
