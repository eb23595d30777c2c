//! Storage error types.

use std::path::PathBuf;

use bdsice_decode::SourceError;
use bdsice_index::IndexError;
use thiserror::Error;

/// Storage operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temp file was written but could not replace the target.
    #[error("failed to replace {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize series {code}")]
    Serialization {
        code: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read series record {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The index snapshot could not be read or written.
    #[error("index snapshot {path} is unusable")]
    Format {
        path: PathBuf,
        #[source]
        source: IndexError,
    },

    #[error("series {code} not found in {}", dir.display())]
    SeriesNotFound { code: String, dir: PathBuf },

    /// Code cannot be used as a file name.
    #[error("invalid series code {code:?}")]
    InvalidCode { code: String },

    #[error(transparent)]
    Decode(#[from] SourceError),
}

impl StoreError {
    /// A hint on how to recover, when there is an obvious one.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Format { .. } => Some("run `bdsice rebuild` to recreate the index"),
            Self::SeriesNotFound { .. } => {
                Some("check the code with `bdsice search`, or run `bdsice rebuild`")
            }
            Self::AtomicWriteFailed { .. } => Some("check free disk space and permissions"),
            Self::Decode(_) => Some("fix or remove the file, or rebuild with skip_invalid"),
            _ => None,
        }
    }
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
