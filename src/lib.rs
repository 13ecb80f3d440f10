//! csvgrid - delimited-text grid engine for a desktop CSV/TSV editor
//!
//! This crate provides the core logic behind a spreadsheet-style editor for
//! delimited text: quote-correct parsing, the always-one-trailing-blank
//! row/column editing invariant, minimal-quoting serialization, dual-view
//! (raw text / table) reconciliation, and conflict-aware file I/O.

pub mod document;
pub mod grid;

// Re-export commonly used types
pub use document::{DocumentError, DocumentGuard, DocumentState, SaveOutcome};
pub use grid::{Delimiter, Grid, ParseLimits};
