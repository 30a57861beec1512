//! Async file utilities used by the checks.
//!
//! Thin wrappers over `tokio::fs` that attach the offending path to every
//! error, plus typed JSON decoding.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::Metadata;
use std::path::Path;
use tokio::fs;

use crate::{Error, Result};

/// Stat a path, failing on any access error (not found, permission denied).
pub async fn probe(path: &Path) -> Result<Metadata> {
    fs::metadata(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

/// Check that a path exists and is a directory.
pub async fn probe_dir(path: &Path) -> Result<()> {
    let meta = probe(path).await?;
    if meta.is_dir() {
        Ok(())
    } else {
        Err(Error::missing(format!("{} is not a directory", path.display())))
    }
}

/// Read a file's contents as a string.
pub async fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

/// Read a file and decode it as JSON into `T`.
///
/// Read faults surface as [`Error::Io`], decode faults as [`Error::Parse`].
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = read_file(path).await?;
    serde_json::from_str(&text)
        .map_err(|e| Error::parse(format!("{}: {e}", path.display())))
}

/// Serialize `value` as pretty JSON and write it to `path` in full.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| Error::parse(format!("{}: {e}", path.display())))?;
    fs::write(path, text)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

/// Remove a file.
pub async fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}
