use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unsupported frequency {0} (expected one of 1, 4, 12, 52, 365)")]
    InvalidFrequency(i64),
    #[error("frequency {raw:?} is not a number")]
    UnparsableFrequency { raw: String },
    #[error("series {code}: {message}")]
    Invariant { code: String, message: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
