//! The decoded time series entity.
//!
//! Persisted records keep the field names of the historical on-disk format
//! (`SerieCode`, `ContainsNaN`, ...) so that existing record files load
//! unchanged. That format cannot carry a not-a-number value, so a missing
//! observation is stored as [`MISSING_VALUE_SENTINEL`] together with the
//! `ContainsNaN` flag. Callers should read values through
//! [`Observations::value`] or [`Observations::iter`], which turn the sentinel
//! back into `None`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::{Frequency, ModelError, Result};

/// Stand-in for a missing observation in persisted records.
pub const MISSING_VALUE_SENTINEL: f64 = -99_999_999.999_999;

/// Returns true if `value` is the missing-value sentinel (bit-for-bit).
pub fn is_missing(value: f64) -> bool {
    value.to_bits() == MISSING_VALUE_SENTINEL.to_bits()
}

/// Observation dates and values, always of equal length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observations {
    #[serde(rename = "Dates", default, deserialize_with = "null_as_empty")]
    pub dates: Vec<DateTime<Utc>>,
    #[serde(rename = "Values", default, deserialize_with = "null_as_empty")]
    pub values: Vec<f64>,
}

impl Observations {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`, `None` when out of range or missing.
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values
            .get(index)
            .copied()
            .filter(|value| !is_missing(*value))
    }

    /// Pairs of (date, value) with missing values as `None`.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, Option<f64>)> + '_ {
        self.dates.iter().zip(&self.values).map(|(date, value)| {
            let value = if is_missing(*value) { None } else { Some(*value) };
            (*date, value)
        })
    }

    fn present(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.iter()
            .filter_map(|(date, value)| value.map(|value| (date, value)))
    }
}

/// One decoded series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    #[serde(rename = "SerieCode")]
    pub code: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Units")]
    pub units: String,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Notes", default, deserialize_with = "null_as_empty")]
    pub notes: Vec<String>,
    /// Display precision hint, never applied to stored values.
    #[serde(rename = "Decimals")]
    pub decimals: u32,
    #[serde(rename = "Frequency")]
    pub frequency: Frequency,
    #[serde(rename = "Start")]
    pub start: Option<DateTime<Utc>>,
    #[serde(rename = "End")]
    pub end: Option<DateTime<Utc>>,
    #[serde(rename = "NumberOfObservations")]
    pub observation_count: usize,
    #[serde(rename = "Observations")]
    pub observations: Observations,
    #[serde(rename = "Public")]
    pub is_public: bool,
    #[serde(rename = "Private")]
    pub is_private: bool,
    #[serde(rename = "Active")]
    pub is_active: bool,
    #[serde(rename = "Text", default, deserialize_with = "null_as_empty")]
    pub free_text: Vec<String>,
    #[serde(rename = "ContainsNaN")]
    pub contains_missing: bool,
}

impl TimeSeries {
    /// An empty public series with the given code.
    pub fn new(code: impl Into<String>, frequency: Frequency) -> Self {
        Self {
            code: code.into(),
            title: String::new(),
            units: String::new(),
            source: String::new(),
            notes: Vec::new(),
            decimals: 0,
            frequency,
            start: None,
            end: None,
            observation_count: 0,
            observations: Observations::default(),
            is_public: true,
            is_private: false,
            is_active: false,
            free_text: Vec::new(),
            contains_missing: false,
        }
    }

    /// Arithmetic mean of the present values.
    pub fn mean(&self) -> Option<f64> {
        let (sum, count) = self
            .observations
            .present()
            .fold((0.0, 0usize), |(sum, count), (_, value)| (sum + value, count + 1));
        (count > 0).then(|| sum / count as f64)
    }

    /// Smallest present value and its date. Ties keep the earliest date.
    pub fn min(&self) -> Option<(f64, DateTime<Utc>)> {
        self.observations
            .present()
            .fold(None, |best, (date, value)| match best {
                Some((current, _)) if current <= value => best,
                _ => Some((value, date)),
            })
    }

    /// Largest present value and its date. Ties keep the earliest date.
    pub fn max(&self) -> Option<(f64, DateTime<Utc>)> {
        self.observations
            .present()
            .fold(None, |best, (date, value)| match best {
                Some((current, _)) if current >= value => best,
                _ => Some((value, date)),
            })
    }

    /// Check the structural invariants of a decoded series.
    pub fn validate(&self) -> Result<()> {
        let fail = |message: String| {
            Err(ModelError::Invariant {
                code: self.code.clone(),
                message,
            })
        };
        let obs = &self.observations;
        if obs.dates.len() != obs.values.len() {
            return fail(format!(
                "{} dates but {} values",
                obs.dates.len(),
                obs.values.len()
            ));
        }
        if obs.values.len() != self.observation_count {
            return fail(format!(
                "declared {} observations but holds {}",
                self.observation_count,
                obs.values.len()
            ));
        }
        if let (Some(first), Some(start)) = (obs.dates.first(), self.start)
            && *first != start
        {
            return fail(format!("first date {first} differs from start {start}"));
        }
        if let (Some(start), Some(end)) = (self.start, self.end)
            && start > end
        {
            return fail(format!("start {start} is after end {end}"));
        }
        if obs.dates.windows(2).any(|pair| pair[0] >= pair[1]) {
            return fail("dates are not strictly increasing".to_string());
        }
        if obs.values.iter().any(|value| value.is_nan()) {
            return fail("values contain NaN; use the missing-value sentinel".to_string());
        }
        if obs.values.iter().any(|value| is_missing(*value)) && !self.contains_missing {
            return fail("sentinel present but ContainsNaN is false".to_string());
        }
        if self.is_public && self.is_private {
            return fail("series is both public and private".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for TimeSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Serie: BDSICE -- {} -- {}", self.code, self.title)
    }
}

// Records written by older tools encode empty sequences as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
