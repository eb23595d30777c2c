//! Data model for series decoded from the BDSICE flat-file export.

pub mod error;
pub mod frequency;
pub mod series;
pub mod text;

pub use error::{ModelError, Result};
pub use frequency::Frequency;
pub use series::{MISSING_VALUE_SENTINEL, Observations, TimeSeries, is_missing};
