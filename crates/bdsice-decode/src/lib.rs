//! Decoding of the BDSICE `.xer` flat-file export.
//!
//! - [`tag`] - line tags and line classification
//! - [`decoder`] - the per-block state machine
//! - [`calendar`] - period parsing and observation date stepping
//! - [`source`] - locating and reading raw files, block splitting

pub mod calendar;
pub mod decoder;
pub mod error;
pub mod source;
pub mod tag;

pub use calendar::{CalendarError, observation_dates, parse_period, step};
pub use decoder::{BlockDecoder, MISSING_VALUE_TOKENS, Mode, decode};
pub use error::{DecodeError, SourceError};
pub use source::{XER_EXTENSION, decode_file, list_xer_files, read_xer_file, split_blocks};
pub use tag::{BLOCK_END, SECTION_END, Tag};
