//! Query term normalization.

use bdsice_model::text::fold_diacritics;

use crate::error::SearchError;

/// Prefix marking a term as an exclusion.
pub const EXCLUDE_PREFIX: char = '-';

/// Turn a raw query term into comparable text.
///
/// The bytes must be UTF-8. Accented letters are folded to their base
/// letters; case is left alone.
pub fn normalize_term(raw: &[u8]) -> Result<String, SearchError> {
    let text = std::str::from_utf8(raw).map_err(|e| SearchError::Normalization {
        term: String::from_utf8_lossy(raw).into_owned(),
        reason: e.to_string(),
    })?;
    Ok(fold_diacritics(text))
}
