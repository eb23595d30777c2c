//! Storage for decoded BDSICE series.
//!
//! A database directory holds the raw `.xer` export, one JSON record per
//! series (`<code>.json`) and the index snapshot (`db.json`). Every write
//! goes through a temp file and a rename.

mod error;
mod io;
mod rebuild;

pub use error::{Result, StoreError};
pub use io::{
    INDEX_FILE_NAME, SERIES_EXTENSION, index_path, load_index, load_series, save_index,
    save_series, series_path, write_atomic,
};
pub use rebuild::{RebuildPolicy, RebuildReport, SkippedFile, rebuild};
