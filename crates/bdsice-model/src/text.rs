//! Text folding shared by the decoder (titles) and the matcher (query terms).

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Strip diacritical marks: canonical decomposition, drop combining marks,
/// canonical recomposition.
///
/// ```
/// use bdsice_model::text::fold_diacritics;
///
/// assert_eq!(fold_diacritics("ÍNDICE DE PRODUCCIÓN"), "INDICE DE PRODUCCION");
/// assert_eq!(fold_diacritics("año"), "ano");
/// ```
pub fn fold_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}
