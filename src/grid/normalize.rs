//! Trailing-blank normalization
//!
//! A table view always exposes one trailing blank row and one trailing blank
//! column so the user can grow the grid by just typing into the edge cells.
//! `ensure_trailing_blank` establishes that shape after every parse or edit;
//! `trim_trailing_blank` is the save-time inverse so round-trips never
//! accumulate phantom blank rows or columns in the file.

use super::model::Grid;

/// Normalize a grid in place: uniform row width, at least 1x1, exactly one
/// all-blank trailing column and one all-blank trailing row.
///
/// Returns `true` when the grid's shape changed, so callers know whether a
/// re-layout is needed. Idempotent: a second call returns `false`.
pub fn ensure_trailing_blank(grid: &mut Grid) -> bool {
    let mut changed = false;
    let rows = grid.rows_mut();

    if rows.is_empty() {
        rows.push(Vec::new());
        changed = true;
    }

    let mut width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    if width == 0 {
        width = 1;
    }

    for row in rows.iter_mut() {
        while row.len() < width {
            row.push(String::new());
            changed = true;
        }
    }

    let last_col_used = rows.iter().any(|r| !r[width - 1].is_empty());
    if last_col_used {
        for row in rows.iter_mut() {
            row.push(String::new());
        }
        changed = true;
    }

    let width = rows[0].len();
    let last_row_used = rows
        .last()
        .map(|r| r.iter().any(|cell| !cell.is_empty()))
        .unwrap_or(false);
    if last_row_used {
        rows.push(vec![String::new(); width]);
        changed = true;
    }

    changed
}

/// Produce the minimal copy of a grid for serialization: drop every trailing
/// all-blank column, then every trailing all-blank row.
///
/// An entirely blank grid trims to zero rows (serializes to empty text).
pub fn trim_trailing_blank(grid: &Grid) -> Grid {
    let mut rows: Vec<Vec<String>> = grid.rows().map(|r| r.to_vec()).collect();

    loop {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        if width == 0 {
            break;
        }
        let last_col_blank = rows
            .iter()
            .all(|r| r.get(width - 1).map(|c| c.is_empty()).unwrap_or(true));
        if !last_col_blank {
            break;
        }
        for row in rows.iter_mut() {
            row.truncate(width - 1);
        }
    }

    while let Some(last) = rows.last() {
        if last.iter().all(|cell| cell.is_empty()) {
            rows.pop();
        } else {
            break;
        }
    }

    Grid::from_rows(rows)
}
