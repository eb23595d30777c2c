use thiserror::Error;

/// Errors raised when reading or writing an index snapshot.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Snapshot bytes do not hold a valid index. Nothing is loaded.
    #[error("invalid index snapshot: {reason}")]
    Format { reason: String },

    #[error("failed to serialize index snapshot")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by a search call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A query term could not be normalized. The whole search is aborted.
    #[error("cannot normalize search term {term:?}: {reason}")]
    Normalization { term: String, reason: String },
}
