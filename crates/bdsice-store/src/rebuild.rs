//! Batch rebuild of the database directory from raw `.xer` files.

use std::path::{Path, PathBuf};

use bdsice_decode::{SourceError, decode_file, list_xer_files};
use bdsice_index::SeriesIndex;
use bdsice_model::TimeSeries;
use tracing::{info, info_span, warn};

use crate::error::Result;
use crate::io::{save_index, save_series};

/// What to do with a raw file that fails to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RebuildPolicy {
    /// Log the failure and carry on with the other files.
    #[default]
    SkipInvalid,
    /// Stop at the first failure. Nothing is written.
    Abort,
}

impl RebuildPolicy {
    pub fn from_skip_invalid(skip_invalid: bool) -> Self {
        if skip_invalid {
            Self::SkipInvalid
        } else {
            Self::Abort
        }
    }
}

/// A raw file left out of the rebuild.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: SourceError,
}

/// Outcome of a rebuild.
#[derive(Debug)]
pub struct RebuildReport {
    /// Raw files found in the directory.
    pub files: usize,
    /// Series records written.
    pub series_saved: usize,
    pub skipped: Vec<SkippedFile>,
    pub index_path: PathBuf,
    pub index: SeriesIndex,
}

/// Decode every raw file in `dir`, save each series and a fresh index.
///
/// All files are decoded before anything is written, so an aborted rebuild
/// leaves the directory as it was.
pub fn rebuild(dir: &Path, policy: RebuildPolicy) -> Result<RebuildReport> {
    let rebuild_span = info_span!("rebuild", dir = %dir.display(), ?policy);
    let _rebuild_guard = rebuild_span.enter();

    let files = list_xer_files(dir)?;
    info!(files = files.len(), "found raw files");

    let (decoded, skipped) =
        info_span!("decode").in_scope(|| decode_all(&files, policy))?;

    let series_saved = info_span!("persist").in_scope(|| -> Result<usize> {
        for series in &decoded {
            save_series(dir, series)?;
        }
        Ok(decoded.len())
    })?;

    let index = SeriesIndex::build(&decoded);
    let index_path = save_index(dir, &index)?;

    info!(
        files = files.len(),
        series = series_saved,
        skipped = skipped.len(),
        entries = index.len(),
        "rebuild finished"
    );
    Ok(RebuildReport {
        files: files.len(),
        series_saved,
        skipped,
        index_path,
        index,
    })
}

fn decode_all(
    files: &[PathBuf],
    policy: RebuildPolicy,
) -> Result<(Vec<TimeSeries>, Vec<SkippedFile>)> {
    let mut decoded = Vec::new();
    let mut skipped = Vec::new();
    for path in files {
        match decode_file(path) {
            Ok(series) => decoded.extend(series),
            Err(error) if policy == RebuildPolicy::SkipInvalid => {
                warn!(path = %path.display(), %error, "skipping raw file");
                skipped.push(SkippedFile {
                    path: path.clone(),
                    error,
                });
            }
            Err(error) => return Err(error.into()),
        }
    }
    Ok((decoded, skipped))
}
