//! Delimited-text parsing
//!
//! A single left-to-right scan with quote support, CRLF handling, and
//! truncation accounting. The parser never fails: malformed input (such as an
//! unterminated quote at end of input) degrades to a best-effort parse.

use serde::{Deserialize, Serialize};

use super::model::{Delimiter, Grid};

/// Caps on the grid returned by [`parse_delimited`].
///
/// Rows and columns beyond the caps are still *counted* so the host can show
/// "first N of M" without re-scanning, but are not materialized. Keeps huge
/// files from freezing the table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseLimits {
    pub max_rows: usize,
    pub max_cols: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_rows: 1000,
            max_cols: 256,
        }
    }
}

/// Result of parsing delimited text.
///
/// `total_rows`/`total_cols` reflect the true size of the source text even
/// when `grid` was capped by [`ParseLimits`].
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub grid: Grid,
    pub total_rows: usize,
    pub total_cols: usize,
    pub rows_truncated: bool,
    pub cols_truncated: bool,
}

/// Parse delimited text into a grid of string cells.
///
/// Quoting rules: a `"` outside quotes opens a quoted section; `""` inside
/// quotes is an escaped literal quote; any other `"` inside quotes closes the
/// section. Outside quotes the delimiter ends the field and `\r\n`, `\r`, or
/// `\n` ends the row. The final field and row are committed even without a
/// trailing terminator, so empty text parses as a single blank cell.
pub fn parse_delimited(text: &str, delimiter: Delimiter, limits: ParseLimits) -> ParseResult {
    let delim = delimiter.char();

    let mut kept: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut row_fields = 0usize;
    let mut total_rows = 0usize;
    let mut total_cols = 0usize;
    let mut in_quotes = false;

    let end_field = |row: &mut Vec<String>, field: &mut String, row_fields: &mut usize| {
        *row_fields += 1;
        if *row_fields <= limits.max_cols {
            row.push(std::mem::take(field));
        } else {
            field.clear();
        }
    };

    let end_row = |kept: &mut Vec<Vec<String>>,
                       row: &mut Vec<String>,
                       row_fields: &mut usize,
                       total_rows: &mut usize,
                       total_cols: &mut usize| {
        *total_rows += 1;
        *total_cols = (*total_cols).max(*row_fields);
        if *total_rows <= limits.max_rows {
            kept.push(std::mem::take(row));
        } else {
            row.clear();
        }
        *row_fields = 0;
    };

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
            continue;
        }

        if ch == '"' {
            in_quotes = true;
            continue;
        }

        if ch == delim {
            end_field(&mut row, &mut field, &mut row_fields);
            continue;
        }

        if ch == '\r' || ch == '\n' {
            // \r\n is one terminator, not two
            if ch == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            end_field(&mut row, &mut field, &mut row_fields);
            end_row(
                &mut kept,
                &mut row,
                &mut row_fields,
                &mut total_rows,
                &mut total_cols,
            );
            continue;
        }

        field.push(ch);
    }

    // An unterminated quote is closed implicitly here: whatever accumulated
    // in `field` is committed like any other final field.
    end_field(&mut row, &mut field, &mut row_fields);
    end_row(
        &mut kept,
        &mut row,
        &mut row_fields,
        &mut total_rows,
        &mut total_cols,
    );

    ParseResult {
        grid: Grid::from_rows(kept),
        total_rows,
        total_cols,
        rows_truncated: total_rows > limits.max_rows,
        cols_truncated: total_cols > limits.max_cols,
    }
}
