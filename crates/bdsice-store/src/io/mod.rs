//! File I/O for series records and the index snapshot.

mod atomic;
mod index;
mod series;

pub use atomic::write_atomic;
pub use index::{INDEX_FILE_NAME, index_path, load_index, save_index};
pub use series::{SERIES_EXTENSION, load_series, save_series, series_path};
