//! Error types for schedpage

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, SchedError>;

/// Errors raised while reading, validating or rendering a schedule
#[derive(Error, Debug)]
pub enum SchedError {
    /// Underlying I/O failure (reading the CSV file, writing the page)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A row's field count disagrees with the header row.
    ///
    /// The CSV decoder itself never fails; this is only produced by the
    /// separate strict validation pass.
    #[error("malformed table: row {row} has {actual} fields, expected {expected}")]
    MalformedTable {
        /// Zero-based index of the offending row
        row: usize,
        /// Field count of the header row
        expected: usize,
        /// Field count actually found
        actual: usize,
    },

    /// A column heading did not match the `<weekday> <week> <cohort> [<lunch>]` shape
    #[error("bad column heading {0:?}: expected 3 or 4 whitespace-separated tokens")]
    Heading(String),

    /// A time cell could not be parsed as a clock time
    #[error("bad time {0:?}: expected a clock time like \"7:30 AM\"")]
    Time(String),

    /// The table cannot be interpreted as a schedule grid
    #[error("invalid schedule: {0}")]
    Schedule(String),
}
