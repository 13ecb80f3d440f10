//! Document state and dual-view reconciliation
//!
//! One `DocumentState` per open document keeps the two editable projections —
//! the raw source text and the structured grid — from diverging. Edits in the
//! table view flow grid → text (normalize, trim, re-serialize); edits in the
//! source view flow text → grid (reparse). Whichever side was edited last is
//! authoritative, and a view switch re-derives the other side from it.
//!
//! The host UI must keep only one view active at a time; the reconciler does
//! not arbitrate simultaneous edits to both projections.

use std::time::SystemTime;

use crate::grid::{
    ensure_trailing_blank, parse_delimited, serialize_grid, trim_trailing_blank, Delimiter, Grid,
    ParseLimits,
};

/// Opaque last-known file modification time, compared only for equality.
pub type ModificationStamp = SystemTime;

/// Which projection was edited last and therefore wins a re-derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthoritativeSide {
    Source,
    Grid,
}

/// Cached table projection: the normalized grid plus the truncation
/// statistics from the parse that produced it, so the host can show
/// "first N of M rows" without re-scanning.
#[derive(Debug, Clone)]
pub struct GridView {
    pub grid: Grid,
    pub total_rows: usize,
    pub total_cols: usize,
    pub rows_truncated: bool,
    pub cols_truncated: bool,
}

/// Ticket for an in-flight load; see [`DocumentState::begin_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

/// In-memory state of one open document.
#[derive(Debug, Clone)]
pub struct DocumentState {
    source_text: String,
    grid: Option<GridView>,
    modification_stamp: Option<ModificationStamp>,
    dirty: bool,
    authoritative: AuthoritativeSide,
    /// Bumped whenever the source text is replaced wholesale; stale async
    /// loads compare against it and discard themselves.
    generation: u64,
}

impl DocumentState {
    /// Create an untitled document: empty text, no backing file, clean.
    pub fn new() -> Self {
        Self {
            source_text: String::new(),
            grid: None,
            modification_stamp: None,
            dirty: false,
            authoritative: AuthoritativeSide::Source,
            generation: 0,
        }
    }

    /// Seed the document from freshly loaded file content.
    ///
    /// Clears the dirty flag, invalidates the cached grid (it is rebuilt
    /// lazily on the next [`grid_view`](Self::grid_view)), and supersedes any
    /// in-flight load.
    pub fn load_into(&mut self, text: String, stamp: Option<ModificationStamp>) {
        self.source_text = text;
        self.modification_stamp = stamp;
        self.dirty = false;
        self.grid = None;
        self.authoritative = AuthoritativeSide::Source;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Capture a token for an async load targeting this document.
    ///
    /// If the user switches away or reloads before the read finishes, the
    /// token goes stale and [`complete_load`](Self::complete_load) discards
    /// the result instead of clobbering newer state.
    pub fn begin_load(&self) -> LoadToken {
        LoadToken(self.generation)
    }

    /// Apply a finished load if its token is still current.
    ///
    /// Returns `false` (and leaves the state untouched) when the load was
    /// superseded.
    pub fn complete_load(
        &mut self,
        token: LoadToken,
        text: String,
        stamp: Option<ModificationStamp>,
    ) -> bool {
        if token.0 != self.generation {
            tracing::debug!("discarding superseded load (token {:?})", token);
            return false;
        }
        self.load_into(text, stamp);
        true
    }

    /// Get the table projection, parsing and normalizing on first access.
    ///
    /// The cached grid is returned on subsequent calls so repeated renders do
    /// not discard in-progress table edits.
    pub fn grid_view(&mut self, delimiter: Delimiter, limits: ParseLimits) -> &mut GridView {
        self.grid
            .get_or_insert_with(|| build_view(&self.source_text, delimiter, limits))
    }

    /// Write a cell edit from the table view and sync it into the source
    /// text.
    ///
    /// Runs trailing-blank normalization (typing into an edge cell grows the
    /// grid) and re-serializes the trimmed grid into `source_text`. Returns
    /// whether the grid's shape changed, as a re-layout hint.
    ///
    /// Requires a current grid view; an edit against a document whose grid
    /// was never derived is logged and ignored. Edits against a truncated
    /// view are refused the same way: re-serializing a capped grid would
    /// drop every row and column beyond the cap.
    pub fn commit_cell_edit(
        &mut self,
        row: usize,
        col: usize,
        value: &str,
        delimiter: Delimiter,
    ) -> bool {
        let Some(view) = self.grid.as_mut() else {
            tracing::warn!("cell edit at ({row}, {col}) with no grid view; ignoring");
            return false;
        };

        if view.rows_truncated || view.cols_truncated {
            tracing::warn!(
                "cell edit at ({row}, {col}) on a truncated grid ({} x {} of {} x {}); ignoring",
                view.grid.row_count(),
                view.grid.column_count(),
                view.total_rows,
                view.total_cols
            );
            return false;
        }

        if row >= view.grid.row_count() {
            tracing::warn!(
                "cell edit at ({row}, {col}) outside grid of {} rows; ignoring",
                view.grid.row_count()
            );
            return false;
        }

        view.grid.set(row, col, value);
        let changed = ensure_trailing_blank(&mut view.grid);

        self.source_text = serialize_grid(&trim_trailing_blank(&view.grid), delimiter);
        self.dirty = true;
        self.authoritative = AuthoritativeSide::Grid;
        changed
    }

    /// Replace the source text from the raw-text view and rebuild the grid.
    ///
    /// Any in-progress table edits not yet committed are discarded: source
    /// edits are authoritative over the grid projection.
    pub fn commit_source_edit(
        &mut self,
        new_text: String,
        delimiter: Delimiter,
        limits: ParseLimits,
    ) {
        self.source_text = new_text;
        self.dirty = true;
        self.grid = Some(build_view(&self.source_text, delimiter, limits));
        self.authoritative = AuthoritativeSide::Source;
    }

    /// Record a successful save: clears the dirty flag and stores the fresh
    /// on-disk stamp for the next conflict check.
    pub fn mark_saved(&mut self, stamp: ModificationStamp) {
        self.dirty = false;
        self.modification_stamp = Some(stamp);
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn modification_stamp(&self) -> Option<ModificationStamp> {
        self.modification_stamp
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn authoritative_side(&self) -> AuthoritativeSide {
        self.authoritative
    }
}

impl Default for DocumentState {
    fn default() -> Self {
        Self::new()
    }
}

fn build_view(text: &str, delimiter: Delimiter, limits: ParseLimits) -> GridView {
    let result = parse_delimited(text, delimiter, limits);
    let mut grid = result.grid;
    ensure_trailing_blank(&mut grid);

    if result.rows_truncated || result.cols_truncated {
        tracing::warn!(
            "grid truncated to {} x {} (source is {} x {})",
            grid.row_count(),
            grid.column_count(),
            result.total_rows,
            result.total_cols
        );
    }

    GridView {
        grid,
        total_rows: result.total_rows,
        total_cols: result.total_cols,
        rows_truncated: result.rows_truncated,
        cols_truncated: result.cols_truncated,
    }
}
