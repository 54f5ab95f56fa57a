//! Schedule domain model: headings, blocks and the grid itself

mod block;
mod grid;
mod heading;

pub use block::{fmt_clock, minute_of_day, Block, School};
pub use grid::{Schedule, Total, Totals};
pub use heading::Heading;
