//! Conflict-aware document I/O
//!
//! Loads and saves UTF-8 text against a backing file while refusing to
//! silently clobber concurrent external changes: `save` compares the caller's
//! last-known modification stamp against the disk before writing, and a
//! mismatch comes back as a structured conflict outcome rather than an error.
//!
//! The filesystem is an injected collaborator ([`FileAccess`]) so tests and
//! alternative hosts can substitute their own; [`OsFileAccess`] is the
//! std-backed default.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use super::state::ModificationStamp;

/// Filesystem boundary consumed by [`DocumentGuard`].
///
/// Text is always UTF-8; binary content is out of scope.
pub trait FileAccess {
    /// Stat a path: its modification stamp and whether it is a regular file.
    fn stat(&self, path: &Path) -> io::Result<(ModificationStamp, bool)>;

    /// Read the full file contents as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write text to the path and return the resulting modification stamp.
    fn write(&self, path: &Path, text: &str) -> io::Result<ModificationStamp>;
}

/// [`FileAccess`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileAccess;

impl FileAccess for OsFileAccess {
    fn stat(&self, path: &Path) -> io::Result<(ModificationStamp, bool)> {
        let metadata = fs::metadata(path)?;
        Ok((metadata.modified()?, metadata.is_file()))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, text: &str) -> io::Result<ModificationStamp> {
        fs::write(path, text)?;
        fs::metadata(path)?.modified()
    }
}

/// Errors raised before any I/O is attempted (or when an open fails outright).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Target path exists but is not a regular file
    NotAFile,
    /// Empty target path on save-as
    InvalidPath,
    /// Underlying I/O failure, message preserved
    Io(String),
}

impl DocumentError {
    /// Get a user-friendly error message
    pub fn user_message(&self, filename: &str) -> String {
        match self {
            Self::NotAFile => format!("Not a file: {}", filename),
            Self::InvalidPath => "Invalid file path".to_string(),
            Self::Io(msg) => format!("Error accessing {}: {}", filename, msg),
        }
    }
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAFile => write!(f, "not a file"),
            Self::InvalidPath => write!(f, "invalid file path"),
            Self::Io(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for DocumentError {}

/// A successfully opened document: its text and on-disk stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedDocument {
    pub text: String,
    pub modification_stamp: ModificationStamp,
}

/// Outcome of a save attempt. Serializable so the host can forward it over
/// IPC unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveOutcome {
    pub ok: bool,
    /// Fresh on-disk stamp after a successful write
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_modification_stamp: Option<ModificationStamp>,
    /// The disk changed since the caller's last-known stamp; nothing was
    /// written
    pub conflict: bool,
    /// What is currently on disk, for the host's reload-or-overwrite prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_modification_stamp: Option<ModificationStamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SaveOutcome {
    fn saved(stamp: ModificationStamp) -> Self {
        Self {
            ok: true,
            new_modification_stamp: Some(stamp),
            conflict: false,
            disk_modification_stamp: None,
            reason: None,
        }
    }

    fn conflicted(disk_stamp: ModificationStamp) -> Self {
        Self {
            ok: false,
            new_modification_stamp: None,
            conflict: true,
            disk_modification_stamp: Some(disk_stamp),
            reason: Some("file changed on disk".to_string()),
        }
    }

    fn failed(reason: String) -> Self {
        Self {
            ok: false,
            new_modification_stamp: None,
            conflict: false,
            disk_modification_stamp: None,
            reason: Some(reason),
        }
    }
}

/// Conflict-aware load/save against a backing file.
#[derive(Debug, Clone, Default)]
pub struct DocumentGuard<F: FileAccess = OsFileAccess> {
    fs: F,
}

impl DocumentGuard<OsFileAccess> {
    /// Guard over the real filesystem
    pub fn new() -> Self {
        Self { fs: OsFileAccess }
    }
}

impl<F: FileAccess> DocumentGuard<F> {
    /// Guard over an injected filesystem collaborator
    pub fn with_file_access(fs: F) -> Self {
        Self { fs }
    }

    /// Open a document: validate the target is a regular file, read its text,
    /// and capture the modification stamp for later conflict checks.
    pub fn open(&self, path: &Path) -> Result<OpenedDocument, DocumentError> {
        let (stamp, is_file) = self
            .fs
            .stat(path)
            .map_err(|e| DocumentError::Io(e.to_string()))?;
        if !is_file {
            return Err(DocumentError::NotAFile);
        }

        let text = self
            .fs
            .read_to_string(path)
            .map_err(|e| DocumentError::Io(e.to_string()))?;

        Ok(OpenedDocument {
            text,
            modification_stamp: stamp,
        })
    }

    /// Save text to an existing file, refusing to overwrite a concurrent
    /// external change.
    ///
    /// When `expected_stamp` is given and differs from the disk stamp, the
    /// write is refused and the outcome carries `conflict: true` plus the
    /// current disk stamp. Pass `None` for the first save of a document with
    /// no known stamp. Path/type errors are `Err` before any write; I/O
    /// failures are non-fatal `ok: false` outcomes.
    pub fn save(
        &self,
        path: &Path,
        text: &str,
        expected_stamp: Option<ModificationStamp>,
    ) -> Result<SaveOutcome, DocumentError> {
        let (disk_stamp, is_file) = self
            .fs
            .stat(path)
            .map_err(|e| DocumentError::Io(e.to_string()))?;
        if !is_file {
            return Err(DocumentError::NotAFile);
        }

        if let Some(expected) = expected_stamp {
            if expected != disk_stamp {
                tracing::warn!("save conflict on {}: disk stamp changed", path.display());
                return Ok(SaveOutcome::conflicted(disk_stamp));
            }
        }

        match self.fs.write(path, text) {
            Ok(new_stamp) => Ok(SaveOutcome::saved(new_stamp)),
            Err(e) => {
                tracing::warn!("save failed on {}: {}", path.display(), e);
                Ok(SaveOutcome::failed(e.to_string()))
            }
        }
    }

    /// Save text under a new identity.
    ///
    /// Never conflict-checks (the target is a new document from this
    /// document's perspective), but requires a non-empty path and refuses a
    /// pre-existing target that is not a regular file.
    pub fn save_as(&self, path: &Path, text: &str) -> Result<SaveOutcome, DocumentError> {
        if path.as_os_str().is_empty() {
            return Err(DocumentError::InvalidPath);
        }

        // A pre-existing target must be a regular file; a missing one is fine.
        match self.fs.stat(path) {
            Ok((_, is_file)) if !is_file => return Err(DocumentError::NotAFile),
            _ => {}
        }

        match self.fs.write(path, text) {
            Ok(new_stamp) => Ok(SaveOutcome::saved(new_stamp)),
            Err(e) => {
                tracing::warn!("save-as failed on {}: {}", path.display(), e);
                Ok(SaveOutcome::failed(e.to_string()))
            }
        }
    }
}
