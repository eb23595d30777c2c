use std::fs;
use std::path::{Path, PathBuf};

use bdsice_index::SeriesIndex;

use super::atomic::write_atomic;
use crate::error::{Result, StoreError};

/// File name of the index snapshot inside the database directory.
pub const INDEX_FILE_NAME: &str = "db.json";

pub fn index_path(dir: &Path) -> PathBuf {
    dir.join(INDEX_FILE_NAME)
}

/// Write the index snapshot, replacing any previous one in one step.
pub fn save_index(dir: &Path, index: &SeriesIndex) -> Result<PathBuf> {
    let path = index_path(dir);
    let bytes = index.to_vec().map_err(|e| StoreError::Format {
        path: path.clone(),
        source: e,
    })?;
    write_atomic(&path, &bytes)?;
    tracing::info!(path = %path.display(), entries = index.len(), "saved index");
    Ok(path)
}

/// Read the index snapshot.
pub fn load_index(dir: &Path) -> Result<SeriesIndex> {
    let path = index_path(dir);
    let bytes = fs::read(&path).map_err(|e| StoreError::Io {
        operation: "read",
        path: path.clone(),
        source: e,
    })?;
    let index = SeriesIndex::from_slice(&bytes).map_err(|e| StoreError::Format {
        path: path.clone(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), entries = index.len(), "loaded index");
    Ok(index)
}
