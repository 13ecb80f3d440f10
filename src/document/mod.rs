//! Document ownership: dual-view state and conflict-aware file I/O
//!
//! [`DocumentState`] keeps one open document's raw-text and grid projections
//! consistent; [`DocumentGuard`] moves that document's text to and from disk
//! without clobbering concurrent external edits.

mod guard;
mod state;

pub use guard::{
    DocumentError, DocumentGuard, FileAccess, OpenedDocument, OsFileAccess, SaveOutcome,
};
pub use state::{AuthoritativeSide, DocumentState, GridView, LoadToken, ModificationStamp};
