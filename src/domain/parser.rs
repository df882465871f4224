//! Comma-separated table parser.
//!
//! Single linear scan over the input. Quoted fields may contain commas and
//! newlines; `""` inside quotes is a literal quote. A bare `\r` outside quotes
//! is dropped so CRLF input parses like LF input. No column-count validation
//! happens here.

use tracing::{instrument, trace};

/// One parsed row: cells in column order.
pub type Row = Vec<String>;

/// Parse delimited text into rows of cells.
///
/// The last row is always emitted, even without a trailing newline, so
/// `"a\n"` yields `[["a"], [""]]`.
#[instrument(level = "trace", skip(text), fields(len = text.len()))]
pub fn parse_rows(text: &str) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    let mut row: Row = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    cell.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                cell.push(ch);
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut cell)),
            '\n' => {
                row.push(std::mem::take(&mut cell));
                rows.push(std::mem::take(&mut row));
            }
            '\r' => {}
            _ => cell.push(ch),
        }
    }

    row.push(cell);
    rows.push(row);

    trace!("parsed {} rows", rows.len());
    rows
}
