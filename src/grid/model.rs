//! Grid data model types

use serde::{Deserialize, Serialize};

/// Supported CSV delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl Delimiter {
    /// Get the character for this delimiter
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
        }
    }

    /// Map a file extension to its conventional delimiter.
    ///
    /// The core never sniffs file content; the caller decides based on the
    /// extension (or its own settings) and passes the result in.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "tsv" => Delimiter::Tab,
            "psv" => Delimiter::Pipe,
            _ => Delimiter::Comma,
        }
    }
}

/// Row/column grid of string cells.
///
/// Every cell is a plain string — CSV has no type system, so neither does the
/// grid. Rows may be ragged after parsing; [`ensure_trailing_blank`] pads them
/// to uniform width before the grid is handed to a table view.
///
/// [`ensure_trailing_blank`]: crate::grid::ensure_trailing_blank
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Create an empty grid (zero rows)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid from parsed rows
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Get number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get number of columns (widest row; rows may be ragged pre-normalization)
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// Get cell value at position. Out-of-bounds positions read as blank.
    pub fn get(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// Set cell value at position.
    ///
    /// Ignored when `row` is out of bounds; a shorter row is padded with blank
    /// cells up to `col` first.
    pub fn set(&mut self, row: usize, col: usize, value: &str) {
        let Some(cells) = self.rows.get_mut(row) else {
            return;
        };

        while cells.len() <= col {
            cells.push(String::new());
        }
        cells[col] = value.to_string();
    }

    /// Check if the grid has no rows at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the cells of one row (empty iterator when out of bounds)
    pub fn row_cells(&self, row: usize) -> impl Iterator<Item = &str> {
        self.rows
            .get(row)
            .map(|r| r.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|s| s.as_str())
    }

    /// Iterate over all rows
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Vec<String>> {
        &mut self.rows
    }
}
