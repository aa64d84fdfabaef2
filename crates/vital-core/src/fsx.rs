//! Safe filesystem primitives with a centralized swallow-and-degrade policy.
//!
//! Every probe the classifier and cache layers make goes through these
//! wrappers: each primitive returns `Result<T, FsError>`, and `or_default`
//! maps any error to the type's default after logging. A permission error or
//! missing path is indistinguishable from "not found" by design — the
//! pipeline degrades to an empty result instead of propagating fs failures.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::errors::FsError;

/// Map an fs result to its default, logging the error at warn level.
pub fn or_default<T: Default>(result: Result<T, FsError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "fs error swallowed, degrading to default");
            T::default()
        }
    }
}

/// Read a file's bytes.
pub fn read(path: &Path) -> Result<Vec<u8>, FsError> {
    fs::read(path).map_err(|source| FsError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Read a file as UTF-8 text (lossy — health exports are occasionally
/// mixed-encoding).
pub fn read_to_string(path: &Path) -> Result<String, FsError> {
    read(path).map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

/// Write bytes, creating parent directories as needed.
pub fn write(path: &Path, bytes: &[u8]) -> Result<(), FsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| FsError::Write {
            path: parent.display().to_string(),
            source,
        })?;
    }
    fs::write(path, bytes).map_err(|source| FsError::Write {
        path: path.display().to_string(),
        source,
    })
}

/// List a directory's entries. Missing or unreadable dirs yield an error the
/// caller is expected to degrade to empty.
pub fn read_dir(path: &Path) -> Result<Vec<PathBuf>, FsError> {
    let entries = fs::read_dir(path).map_err(|source| FsError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(entries.flatten().map(|e| e.path()).collect())
}

/// Whether a path exists. Probe errors count as "does not exist".
pub fn exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}

/// Whether a path is a directory. Probe errors count as "no".
pub fn is_dir(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// File size in bytes.
pub fn file_size(path: &Path) -> Result<u64, FsError> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|source| FsError::Metadata {
            path: path.display().to_string(),
            source,
        })
}

/// Last-modified time as UTC. Falls back to the epoch when the platform
/// cannot report mtime.
pub fn modified(path: &Path) -> Result<DateTime<Utc>, FsError> {
    let meta = fs::metadata(path).map_err(|source| FsError::Metadata {
        path: path.display().to_string(),
        source,
    })?;
    Ok(meta
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| DateTime::<Utc>::UNIX_EPOCH))
}
