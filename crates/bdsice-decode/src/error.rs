//! Error types for record decoding and raw file access.

use std::path::PathBuf;
use thiserror::Error;

use crate::tag::Tag;

/// A record block could not be turned into a series.
///
/// Every variant is fatal for the block it came from; whether to skip the
/// block or abort a batch is up to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A line outside notes, free text and value rows with no known tag.
    #[error("line {line}: unrecognized line {content:?}")]
    UnrecognizedLine { line: usize, content: String },

    /// A known tag whose payload does not parse, or a declared observation
    /// count that disagrees with the parsed values.
    #[error("line {line}: malformed {tag} field {payload:?}: {reason}")]
    MalformedField {
        tag: Tag,
        line: usize,
        payload: String,
        reason: String,
    },

    /// A field needed to build the series never appeared in the block.
    #[error("missing required {tag} field")]
    MissingField { tag: Tag },
}

impl DecodeError {
    pub(crate) fn malformed(
        tag: Tag,
        line: usize,
        payload: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedField {
            tag,
            line,
            payload: payload.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while locating or reading raw `.xer` files.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file holds no record block.
    #[error("no record block found in {path}")]
    EmptyFile { path: PathBuf },

    /// A block in the file failed to decode.
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DecodeError::malformed(Tag::Decimals, 6, "two", "not an integer");
        assert_eq!(
            err.to_string(),
            "line 6: malformed DEC field \"two\": not an integer"
        );
        let err = DecodeError::MissingField { tag: Tag::Start };
        assert_eq!(err.to_string(), "missing required INI field");
    }
}
