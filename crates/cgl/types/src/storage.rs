//! JSON file persistence for chains and reports.
//!
//! Every write re-serializes the whole value and overwrites the file, so a
//! chain of n records costs O(n) per append. Callers needing production
//! scale should put a write-ahead log behind the same hash-chaining
//! semantics. Two processes must never share one path.

use crate::error::StorageResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Overwrite `path` with the pretty-printed JSON form of `value`.
///
/// Parent directories are created on demand.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json.as_bytes())?;
    debug!(path = %path.display(), bytes = json.len(), "persisted json");
    Ok(())
}

/// Read and deserialize `path`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> StorageResult<T> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Like [`read_json`], but a missing file yields `T::default()`.
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> StorageResult<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    read_json(path)
}
