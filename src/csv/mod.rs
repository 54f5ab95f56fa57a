//! CSV decoding and encoding

mod encoder;
mod parser;

pub use encoder::CsvEncoder;
pub use parser::CsvParser;
