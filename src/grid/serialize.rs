//! Grid serialization
//!
//! The exact inverse of the parser composed with trailing-blank trimming:
//! `parse(serialize(trim(g)))` reproduces `trim(g)` for any grid.

use super::model::{Delimiter, Grid};

/// Escape a single field for delimited output.
///
/// The field is wrapped in quotes (with internal quotes doubled) if and only
/// if it contains the delimiter, a quote, or a line terminator; otherwise it
/// is emitted literally.
pub fn escape_field(value: &str, delimiter: Delimiter) -> String {
    let delim = delimiter.char();
    let needs_quoting = value
        .chars()
        .any(|c| c == delim || c == '"' || c == '\n' || c == '\r');

    if !needs_quoting {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Serialize a grid back into delimited text.
///
/// Fields are joined by the delimiter and rows by a single `\n`, with no
/// terminator after the last row. An empty grid serializes to the empty
/// string.
pub fn serialize_grid(grid: &Grid, delimiter: Delimiter) -> String {
    let delim = delimiter.char();
    let mut out = String::new();

    for (i, row) in grid.rows().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for (j, cell) in row.iter().enumerate() {
            if j > 0 {
                out.push(delim);
            }
            out.push_str(&escape_field(cell, delimiter));
        }
    }

    out
}
