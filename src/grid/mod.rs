//! Delimited-text grid engine
//!
//! Turns raw CSV/TSV text into an editable grid of string cells and back:
//!
//! - [`parse_delimited`] — quote-aware single-pass parse with truncation
//!   accounting
//! - [`ensure_trailing_blank`] / [`trim_trailing_blank`] — the spreadsheet
//!   "always one blank row/column at the edge" invariant and its save-time
//!   inverse
//! - [`serialize_grid`] — minimal-quoting serialization, the exact inverse of
//!   parsing composed with trimming
//!
//! # Architecture
//!
//! ```text
//! DocumentState (document::state)
//! └── GridView
//!         ├── Grid (normalized cells)
//!         └── truncation stats from the parse
//! ```
//!
//! Everything here is a pure in-memory transformation; file I/O lives in
//! [`crate::document`].

mod model;
mod normalize;
mod parser;
mod serialize;

pub use model::{Delimiter, Grid};
pub use normalize::{ensure_trailing_blank, trim_trailing_blank};
pub use parser::{parse_delimited, ParseLimits, ParseResult};
pub use serialize::{escape_field, serialize_grid};
