//! Permissive CSV decoding with RFC 4180-like quoting

/// CSV parser for decoding whole documents or single records
///
/// The parser is deliberately permissive: it never fails, whatever the
/// input looks like. Unterminated quotes and ragged rows decode to a
/// best-effort partial structure. Callers that need a rectangular table
/// run [`Table::validate_rectangular`](crate::Table::validate_rectangular)
/// afterwards.
pub struct CsvParser {
    delimiter: u8,
    quote_char: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        CsvParser::new(b',', b'"')
    }
}

impl CsvParser {
    /// Create a new CSV parser with custom delimiter and quote character
    pub fn new(delimiter: u8, quote_char: u8) -> Self {
        Self {
            delimiter,
            quote_char,
        }
    }

    /// Decode a whole CSV document into rows of fields
    ///
    /// Single left-to-right scan with one character of lookback:
    ///
    /// - a doubled quote character decodes to one literal quote;
    /// - the delimiter and `\n` are structural only outside quotes;
    /// - a `\r` immediately before a row boundary is stripped, a lone `\r`
    ///   is kept verbatim;
    /// - fields are never trimmed.
    ///
    /// The accumulator starts as one row holding one empty field, so the
    /// empty document decodes to `[[""]]` and a trailing newline opens a
    /// final empty row (`"a,b\n"` decodes to `[["a", "b"], [""]]`). Both
    /// behaviors are kept for compatibility with existing spreadsheet
    /// exports; [`Table::trim_trailing_blank_rows`](crate::Table::trim_trailing_blank_rows)
    /// compensates downstream.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedpage::CsvParser;
    ///
    /// let rows = CsvParser::default().parse_document("a,\"b,c\"\nd,e");
    /// assert_eq!(rows, vec![vec!["a", "b,c"], vec!["d", "e"]]);
    /// ```
    pub fn parse_document(&self, input: &str) -> Vec<Vec<String>> {
        let delimiter = self.delimiter as char;
        let quote = self.quote_char as char;

        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut row: Vec<String> = Vec::new();
        let mut field = String::new();
        let mut unquoted = true;
        let mut prev: Option<char> = None;

        for ch in input.chars() {
            if ch == quote {
                if unquoted && prev == Some(quote) {
                    // Second half of a doubled quote: one literal quote,
                    // and the span it appeared in is still quoted.
                    field.push(quote);
                    unquoted = false;
                } else {
                    unquoted = !unquoted;
                }
            } else if ch == delimiter && unquoted {
                row.push(std::mem::take(&mut field));
            } else if ch == '\n' && unquoted {
                if prev == Some('\r') {
                    // CRLF row boundary: the \r was appended last pass
                    field.pop();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            } else {
                field.push(ch);
            }
            prev = Some(ch);
        }

        // Whatever is pending at end of input closes implicitly, even
        // inside an unterminated quote.
        row.push(field);
        rows.push(row);
        rows
    }

    /// Decode a single record (no unquoted newline expected)
    ///
    /// Convenience for line-oriented callers. If the input does contain an
    /// unquoted `\n`, only the first record is returned.
    pub fn parse_line(&self, line: &str) -> Vec<String> {
        let mut rows = self.parse_document(line);
        rows.swap_remove(0)
    }
}
