//! Decode a CSV snippet and print the resulting rows
//!
//! Run with: cargo run --example parse_csv

use schedpage::{CsvParser, Table};

fn main() {
    let csv = "Name,Quote,Note\n\
               Alice,\"Say \"\"Hello\"\"\",plain\n\
               Bob,\"a,b\",\"multi\nline\"\n";

    let parser = CsvParser::default();
    for (i, row) in parser.parse_document(csv).iter().enumerate() {
        println!("Row {}: {:?}", i, row);
    }

    // The strict pass catches ragged exports the decoder let through
    let ragged = Table::from_csv("a,b,c\nd,e\n");
    match ragged.validate_rectangular() {
        Ok(()) => println!("table is rectangular"),
        Err(e) => println!("validation: {e}"),
    }
}
