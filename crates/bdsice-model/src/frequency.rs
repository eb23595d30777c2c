use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Sampling cadence of a series.
///
/// The discriminant is the number of observations per year, which is also
/// how the raw export and the persisted records encode it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Frequency {
    Annual = 1,
    Quarterly = 4,
    Monthly = 12,
    Weekly = 52,
    Daily = 365,
}

impl Frequency {
    pub const ALL: [Frequency; 5] = [
        Frequency::Annual,
        Frequency::Quarterly,
        Frequency::Monthly,
        Frequency::Weekly,
        Frequency::Daily,
    ];

    /// Observations per year.
    pub fn periods_per_year(self) -> u32 {
        self as u32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Annual => "annual",
            Frequency::Quarterly => "quarterly",
            Frequency::Monthly => "monthly",
            Frequency::Weekly => "weekly",
            Frequency::Daily => "daily",
        }
    }
}

impl TryFrom<i64> for Frequency {
    type Error = ModelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Frequency::Annual),
            4 => Ok(Frequency::Quarterly),
            12 => Ok(Frequency::Monthly),
            52 => Ok(Frequency::Weekly),
            365 => Ok(Frequency::Daily),
            other => Err(ModelError::InvalidFrequency(other)),
        }
    }
}

impl From<Frequency> for i64 {
    fn from(value: Frequency) -> Self {
        value as i64
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.periods_per_year())
    }
}

impl FromStr for Frequency {
    type Err = ModelError;

    /// Parses the numeric form used by the raw export (`"12"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| ModelError::UnparsableFrequency { raw: s.to_string() })?;
        Frequency::try_from(value)
    }
}
