//! Catalog of series codes and titles, and the search run over it.

pub mod error;
pub mod index;
pub mod matcher;
pub mod normalize;

pub use error::{IndexError, SearchError};
pub use index::SeriesIndex;
pub use matcher::{Query, match_all, search};
pub use normalize::{EXCLUDE_PREFIX, normalize_term};
