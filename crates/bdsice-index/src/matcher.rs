//! Multi-term search with exclusions.
//!
//! A term matches an entry when the entry's code contains the term as typed,
//! or its title contains the upper-cased term. Titles are stored upper-case
//! and without accents, so folding the term is enough to make the match
//! insensitive to both.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::SearchError;
use crate::normalize::{EXCLUDE_PREFIX, normalize_term};

/// A query split into terms that must match and terms that must not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl Query {
    /// Normalize every term and sort it by its leading `-`.
    ///
    /// The first term that fails to normalize aborts the whole query.
    pub fn parse<I, T>(terms: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut query = Self::default();
        for raw in terms {
            let term = normalize_term(raw.as_ref())?;
            match term.strip_prefix(EXCLUDE_PREFIX) {
                Some(rest) => query.exclude.push(rest.to_string()),
                None => query.include.push(term),
            }
        }
        Ok(query)
    }

    pub fn include(&self) -> &[String] {
        &self.include
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }
}

fn term_matches(code: &str, title: &str, term: &str) -> bool {
    code.contains(term) || title.contains(&term.to_uppercase())
}

/// Entries matching every include term.
///
/// The last term filters the full catalog and each earlier term narrows the
/// result. No include terms means no matches.
pub fn match_all(entries: &BTreeMap<String, String>, include: &[String]) -> BTreeMap<String, String> {
    let Some((last, rest)) = include.split_last() else {
        return BTreeMap::new();
    };
    let mut found: BTreeMap<String, String> = entries
        .iter()
        .filter(|(code, title)| term_matches(code, title, last))
        .map(|(code, title)| (code.clone(), title.clone()))
        .collect();
    for term in rest.iter().rev() {
        found.retain(|code, title| term_matches(code, title, term));
    }
    found
}

/// Run a query against a code to title map.
///
/// Exclusions apply after matching and drop any entry an excluded term would
/// have matched. A lone `-` excludes everything.
pub fn search<I, T>(
    entries: &BTreeMap<String, String>,
    terms: I,
) -> Result<BTreeMap<String, String>, SearchError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let query = Query::parse(terms)?;
    let mut found = match_all(entries, &query.include);
    found.retain(|code, title| !query.exclude.iter().any(|term| term_matches(code, title, term)));
    debug!(
        include = query.include.len(),
        exclude = query.exclude.len(),
        matches = found.len(),
        "search finished"
    );
    Ok(found)
}
