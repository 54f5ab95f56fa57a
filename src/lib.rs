//! # schedpage
//!
//! Schedule comparison webpage generator. Spreadsheet exports of a school
//! schedule (one row per minute, one column per cohort per cycle day) are
//! decoded from CSV, interpreted as a grid of named blocks and rendered as
//! a static HTML comparison page.
//!
//! The CSV decoder is deliberately permissive: it never fails, whatever
//! the input looks like, and raggedness is only rejected by an explicit
//! validation pass. See [`CsvParser`] for the exact rules.
//!
//! ```
//! use schedpage::{RenderOptions, Schedule, Table};
//!
//! let table = Table::from_csv(
//!     "STEAM,Monday A BHS\n\
//!      7:30 AM,A1\n\
//!      7:31 AM,A1\n",
//! );
//! let schedule = Schedule::from_table(table, false).unwrap();
//! let page = schedpage::render_page(&schedule, &RenderOptions::default()).unwrap();
//! assert!(page.contains("A1"));
//! ```

pub mod csv;
pub mod error;
pub mod html;
pub mod schedule;
pub mod table;

pub use csv::{CsvEncoder, CsvParser};
pub use error::{Result, SchedError};
pub use html::{render_page, RenderOptions};
pub use schedule::{Block, Heading, Schedule, School, Total, Totals};
pub use table::Table;
