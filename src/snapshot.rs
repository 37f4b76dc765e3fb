//! Copy-on-read snapshots of live SQLite databases.
//!
//! Firefox keeps its stores open and writes to them while running, so
//! reading the live file risks locking stalls and partial reads. Every pass
//! copies the file into a fresh private directory and queries the copy
//! instead. The copy reflects the moment it was taken, never an
//! inconsistent intermediate state; WAL contents newer than the last
//! checkpoint are not captured.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{FoxmarksError, Result};

/// A point-in-time private copy of a single database file.
///
/// The backing directory is removed when the snapshot is dropped, on normal,
/// error, and cancelled exits alike.
#[derive(Debug)]
pub struct Snapshot {
    dir: TempDir,
    path: PathBuf,
}

impl Snapshot {
    /// Path of the copied database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding this snapshot.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Creates snapshots under a caller-chosen temp root.
#[derive(Debug, Clone)]
pub struct Snapshotter {
    temp_root: PathBuf,
}

impl Snapshotter {
    pub fn new(temp_root: impl Into<PathBuf>) -> Self {
        Self {
            temp_root: temp_root.into(),
        }
    }

    /// Copy `source` byte-for-byte into a fresh uniquely-named directory,
    /// preserving the base filename.
    ///
    /// Uniqueness comes from the directory-creation primitive itself, so
    /// concurrent passes cannot collide. Nothing is cached or reused; each
    /// pass re-copies so staleness is bounded by one pass.
    pub fn snapshot(&self, source: &Path) -> Result<Snapshot> {
        let file_name = source.file_name().ok_or_else(|| {
            FoxmarksError::NotFound(format!("Not a database file: {}", source.display()))
        })?;

        let dir = TempDir::with_prefix_in("foxmarks-", &self.temp_root)?;
        let path = dir.path().join(file_name);
        fs::copy(source, &path)?;
        log::debug!("Snapshotted {} to {}", source.display(), path.display());

        Ok(Snapshot { dir, path })
    }
}
