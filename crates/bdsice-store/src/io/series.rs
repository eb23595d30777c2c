use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bdsice_model::TimeSeries;

use super::atomic::write_atomic;
use super::index::INDEX_FILE_NAME;
use crate::error::{Result, StoreError};

/// Extension of a persisted series record.
pub const SERIES_EXTENSION: &str = "json";

/// Location of the record for `code` inside `dir`.
///
/// Codes become file names, so anything that could step outside `dir` or
/// land on the index snapshot is refused.
pub fn series_path(dir: &Path, code: &str) -> Result<PathBuf> {
    let file_name = format!("{code}.{SERIES_EXTENSION}");
    let usable = !code.is_empty()
        && code != "."
        && code != ".."
        && !code.contains(['/', '\\', '\0'])
        && file_name != INDEX_FILE_NAME;
    if !usable {
        return Err(StoreError::InvalidCode {
            code: code.to_string(),
        });
    }
    Ok(dir.join(file_name))
}

/// Write one series as pretty JSON to `<dir>/<code>.json`.
pub fn save_series(dir: &Path, series: &TimeSeries) -> Result<PathBuf> {
    let path = series_path(dir, &series.code)?;
    let bytes = serde_json::to_vec_pretty(series).map_err(|e| StoreError::Serialization {
        code: series.code.clone(),
        source: e,
    })?;
    write_atomic(&path, &bytes)?;
    Ok(path)
}

/// Read the record saved for `code`.
pub fn load_series(dir: &Path, code: &str) -> Result<TimeSeries> {
    let path = series_path(dir, code)?;
    let bytes = fs::read(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => StoreError::SeriesNotFound {
            code: code.to_string(),
            dir: dir.to_path_buf(),
        },
        _ => StoreError::Io {
            operation: "read",
            path: path.clone(),
            source: e,
        },
    })?;
    serde_json::from_slice(&bytes).map_err(|e| StoreError::Deserialization { path, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_codes_that_leave_the_directory() {
        let dir = Path::new("/data");
        for code in ["", "..", "a/b", "..\\x", "db"] {
            assert!(matches!(
                series_path(dir, code),
                Err(StoreError::InvalidCode { .. })
            ));
        }
        assert_eq!(
            series_path(dir, "100010").unwrap(),
            Path::new("/data/100010.json")
        );
    }
}
