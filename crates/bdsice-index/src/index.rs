//! Code to title catalog over a set of decoded series.

use std::collections::{BTreeMap, BTreeSet};

use bdsice_model::TimeSeries;
use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IndexError, SearchError};
use crate::matcher;

/// Catalog of every known series code and its title.
///
/// `codes` lists each key of `entries` exactly once and is used for random
/// selection. Field names follow the historical `db.json` layout; the
/// lower-case names are accepted on load as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesIndex {
    #[serde(rename = "Series", alias = "entries")]
    entries: BTreeMap<String, String>,
    #[serde(rename = "Codes", alias = "codes")]
    codes: Vec<String>,
    #[serde(rename = "LastUpdate", alias = "lastBuildTime")]
    last_build_time: DateTime<Utc>,
}

impl SeriesIndex {
    /// Build a catalog stamped with the current time.
    pub fn build<'a, I>(series: I) -> Self
    where
        I: IntoIterator<Item = &'a TimeSeries>,
    {
        Self::build_at(series, Utc::now())
    }

    /// Build a catalog with an explicit build time.
    ///
    /// When two series share a code the later title wins and the code is
    /// listed once.
    pub fn build_at<'a, I>(series: I, built_at: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a TimeSeries>,
    {
        let mut entries = BTreeMap::new();
        let mut codes = Vec::new();
        for serie in series {
            if entries
                .insert(serie.code.clone(), serie.title.clone())
                .is_none()
            {
                codes.push(serie.code.clone());
            }
        }
        debug!(entries = entries.len(), "built series index");
        Self {
            entries,
            codes,
            last_build_time: built_at,
        }
    }

    /// Restore a catalog from snapshot bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, IndexError> {
        let index: Self = serde_json::from_slice(bytes).map_err(|e| IndexError::Format {
            reason: e.to_string(),
        })?;
        index.check_codes()?;
        Ok(index)
    }

    /// Serialize the catalog to snapshot bytes.
    pub fn to_vec(&self) -> Result<Vec<u8>, IndexError> {
        serde_json::to_vec_pretty(self).map_err(|e| IndexError::Serialization { source: e })
    }

    fn check_codes(&self) -> Result<(), IndexError> {
        let mut seen = BTreeSet::new();
        for code in &self.codes {
            if !seen.insert(code.as_str()) {
                return Err(IndexError::Format {
                    reason: format!("code {code} is listed twice"),
                });
            }
            if !self.entries.contains_key(code) {
                return Err(IndexError::Format {
                    reason: format!("code {code} has no title entry"),
                });
            }
        }
        if let Some(code) = self.entries.keys().find(|k| !seen.contains(k.as_str())) {
            return Err(IndexError::Format {
                reason: format!("code {code} is missing from the code list"),
            });
        }
        Ok(())
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn last_build_time(&self) -> DateTime<Utc> {
        self.last_build_time
    }

    pub fn title(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pick a code uniformly at random, or `None` for an empty catalog.
    pub fn random_code<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.codes.choose(rng).map(String::as_str)
    }

    /// Search titles and codes. See [`matcher::search`].
    pub fn search<I, T>(&self, terms: I) -> Result<BTreeMap<String, String>, SearchError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        matcher::search(&self.entries, terms)
    }
}
