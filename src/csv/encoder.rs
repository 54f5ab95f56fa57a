//! CSV encoding that round-trips through the decoder

use crate::table::Table;

/// CSV encoder producing output the parser decodes back unchanged
pub struct CsvEncoder {
    delimiter: u8,
    quote_char: u8,
}

impl Default for CsvEncoder {
    fn default() -> Self {
        CsvEncoder::new(b',', b'"')
    }
}

impl CsvEncoder {
    /// Create a new CSV encoder with custom delimiter and quote character
    pub fn new(delimiter: u8, quote_char: u8) -> Self {
        Self {
            delimiter,
            quote_char,
        }
    }

    /// Encode a whole table
    ///
    /// Rows are joined with `\n` and no trailing newline is emitted, so
    /// re-parsing the output yields the original table exactly, including
    /// a trailing empty row if the table carries one.
    pub fn encode_table(&self, table: &Table) -> String {
        let mut out = String::new();
        for (i, row) in table.rows().iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            self.encode_row_into(row.iter().map(|f| f.as_str()), &mut out);
        }
        out
    }

    /// Encode a single row into the output buffer (no line terminator)
    pub fn encode_row_into<'a, I>(&self, fields: I, out: &mut String)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                out.push(self.delimiter as char);
            }
            self.encode_field(field, out);
        }
    }

    /// Encode a single row into a fresh string
    pub fn encode_row<'a, I>(&self, fields: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut out = String::new();
        self.encode_row_into(fields, &mut out);
        out
    }

    fn encode_field(&self, field: &str, out: &mut String) {
        let quote = self.quote_char as char;
        if self.needs_quoting(field) {
            out.push(quote);
            for ch in field.chars() {
                if ch == quote {
                    // Escape by doubling: " -> ""
                    out.push(quote);
                }
                out.push(ch);
            }
            out.push(quote);
        } else {
            out.push_str(field);
        }
    }

    fn needs_quoting(&self, field: &str) -> bool {
        field.bytes().any(|b| {
            b == self.delimiter || b == self.quote_char || b == b'\n' || b == b'\r'
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::CsvParser;

    fn encode(fields: &[&str]) -> String {
        CsvEncoder::default().encode_row(fields.iter().copied())
    }

    #[test]
    fn test_simple_fields() {
        assert_eq!(encode(&["a", "b", "c"]), "a,b,c");
    }

    #[test]
    fn test_delimiter_forces_quoting() {
        assert_eq!(encode(&["a,b", "c"]), r#""a,b",c"#);
    }

    #[test]
    fn test_quotes_doubled() {
        assert_eq!(encode(&[r#"Say "Hello""#, "world"]), r#""Say ""Hello""",world"#);
    }

    #[test]
    fn test_newline_forces_quoting() {
        assert_eq!(encode(&["Line 1\nLine 2", "normal"]), "\"Line 1\nLine 2\",normal");
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(encode(&["a", "", "c"]), "a,,c");
        assert_eq!(encode(&["", "", ""]), ",,");
    }

    #[test]
    fn test_table_round_trip() {
        let rows = vec![
            vec!["Name".to_string(), "Quote".to_string()],
            vec!["a,b".to_string(), "c\"d".to_string()],
            vec!["multi\nline".to_string(), "plain".to_string()],
            vec!["".to_string(), "cr\rinside".to_string()],
        ];
        let table = Table::new(rows.clone());

        let encoded = CsvEncoder::default().encode_table(&table);
        let reparsed = CsvParser::default().parse_document(&encoded);
        assert_eq!(reparsed, rows);
    }

    #[test]
    fn test_trailing_empty_row_round_trips() {
        // The decoder's trailing-newline quirk survives a round trip
        let rows = CsvParser::default().parse_document("a,b,c\n");
        let table = Table::new(rows.clone());
        let encoded = CsvEncoder::default().encode_table(&table);
        assert_eq!(encoded, "a,b,c\n");
        assert_eq!(CsvParser::default().parse_document(&encoded), rows);
    }

    #[test]
    fn test_custom_delimiter() {
        let encoder = CsvEncoder::new(b';', b'"');
        assert_eq!(
            encoder.encode_row(["a", "b;c", "d"]),
            r#"a;"b;c";d"#
        );
    }
}
