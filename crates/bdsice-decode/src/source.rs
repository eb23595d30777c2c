//! Locating raw `.xer` files, reading them and cutting them into record
//! blocks.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bdsice_model::TimeSeries;
use tracing::debug;

use crate::decoder::{Mode, decode};
use crate::error::SourceError;

/// Extension of raw export files, matched case-insensitively.
pub const XER_EXTENSION: &str = "xer";

fn is_xer_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(XER_EXTENSION))
}

/// Raw files of a database directory, in path order.
pub fn list_xer_files(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let read_error = |source: std::io::Error| match source.kind() {
        ErrorKind::NotFound | ErrorKind::NotADirectory => SourceError::DirectoryNotFound {
            path: dir.to_path_buf(),
        },
        _ => SourceError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        },
    };
    let mut files = fs::read_dir(dir)
        .map_err(read_error)?
        .map(|entry| entry.map(|e| e.path()).map_err(read_error))
        .collect::<Result<Vec<_>, _>>()?;
    files.retain(|path| is_xer_file(path));
    files.sort();
    Ok(files)
}

/// Decode raw file bytes into text.
///
/// Exports are ISO-8859-1; files that are already valid UTF-8 are taken
/// as they are.
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    }
}

/// Split text into lines, dropping the `\r` of CRLF endings.
pub fn text_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Read a raw file as a sequence of lines.
pub fn read_xer_file(path: &Path) -> Result<Vec<String>, SourceError> {
    let bytes = fs::read(path).map_err(|e| SourceError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(text_lines(&decode_text(bytes)))
}

/// Cut a line stream into record blocks.
///
/// A block ends where the decoder would stop reading it, so a `#` line
/// inside notes does not close it. Blank lines between blocks are dropped;
/// trailing lines without a terminator form a final block.
pub fn split_blocks<I>(lines: I) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = String>,
{
    let mut blocks = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut mode = Mode::Fields;
    for line in lines {
        if current.is_empty() && line.trim().is_empty() {
            continue;
        }
        mode = mode.after(&line);
        current.push(line);
        if mode == Mode::Done {
            blocks.push(std::mem::take(&mut current));
            mode = Mode::Fields;
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Decode every block of a raw file.
///
/// A block without a `COD:` payload takes its code from the file stem,
/// which is how the export names its files.
pub fn decode_file(path: &Path) -> Result<Vec<TimeSeries>, SourceError> {
    let blocks = split_blocks(read_xer_file(path)?);
    if blocks.is_empty() {
        return Err(SourceError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    let stem = path
        .file_stem()
        .and_then(|v| v.to_str())
        .unwrap_or("")
        .to_string();

    let mut decoded = Vec::with_capacity(blocks.len());
    for block in &blocks {
        let mut series = decode(block).map_err(|e| SourceError::Decode {
            path: path.to_path_buf(),
            source: e,
        })?;
        if series.code.is_empty() {
            series.code = stem.clone();
        }
        decoded.push(series);
    }
    debug!(path = %path.display(), blocks = decoded.len(), "decoded file");
    Ok(decoded)
}
