//! Frequency-dependent period parsing and date stepping.
//!
//! Period payloads (`INI:`/`FIN:`) are decoded per frequency:
//!
//! | Frequency | Payload           | Date                                  |
//! |-----------|-------------------|---------------------------------------|
//! | 1         | `year`            | January 1                             |
//! | 4         | `year quarter`    | first day of month `3 * quarter`      |
//! | 12        | `year month`      | first day of `month`                  |
//! | 52        | `year week`       | month `week`, day `week`              |
//! | 365       | `year month day`  | that day                              |
//!
//! Components are not range checked: month 13 is January of the following
//! year and day 32 of January is February 1. A weekly `2020 5` is therefore
//! May 5, and week 20 lands in August of the following year. Stepping uses
//! the same rollover rule, so January 31 plus one month is March 2 (or 3).

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Utc};
use thiserror::Error;

use bdsice_model::Frequency;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("expected {expected} component(s), found {found}")]
    MissingComponent { expected: usize, found: usize },
    #[error("component {value:?} is not an integer")]
    InvalidComponent { value: String },
    #[error("date is outside the supported calendar range")]
    OutOfRange,
}

/// Parse a period payload into the date it denotes.
pub fn parse_period(payload: &str, frequency: Frequency) -> Result<NaiveDate, CalendarError> {
    let expected = match frequency {
        Frequency::Annual => 1,
        Frequency::Quarterly | Frequency::Monthly | Frequency::Weekly => 2,
        Frequency::Daily => 3,
    };
    let parts: Vec<&str> = payload.split_whitespace().collect();
    if parts.len() < expected {
        return Err(CalendarError::MissingComponent {
            expected,
            found: parts.len(),
        });
    }
    let mut numbers = [0i64; 3];
    for (slot, raw) in numbers.iter_mut().zip(&parts[..expected]) {
        *slot = raw.parse().map_err(|_| CalendarError::InvalidComponent {
            value: (*raw).to_string(),
        })?;
    }
    let [year, second, third] = numbers;

    let date = match frequency {
        Frequency::Annual => normalized_date(year, 1, 1),
        Frequency::Quarterly => normalized_date(year, second.checked_mul(3).unwrap_or(i64::MAX), 1),
        Frequency::Monthly => normalized_date(year, second, 1),
        Frequency::Weekly => normalized_date(year, second, second),
        Frequency::Daily => normalized_date(year, second, third),
    };
    date.ok_or(CalendarError::OutOfRange)
}

/// The observation date that follows `date` at the given frequency.
pub fn step(date: NaiveDate, frequency: Frequency) -> Option<NaiveDate> {
    let (years, months, days) = match frequency {
        Frequency::Annual => (1, 0, 0),
        Frequency::Quarterly => (0, 3, 0),
        Frequency::Monthly => (0, 1, 0),
        Frequency::Weekly => (0, 0, 7),
        Frequency::Daily => (0, 0, 1),
    };
    normalized_date(
        i64::from(date.year()) + years,
        i64::from(date.month()) + months,
        i64::from(date.day()) + days,
    )
}

/// `count` dates starting at `start`, spaced by the frequency step.
pub fn observation_dates(
    start: NaiveDate,
    frequency: Frequency,
    count: usize,
) -> Result<Vec<NaiveDate>, CalendarError> {
    let dates: Vec<NaiveDate> = std::iter::successors(Some(start), |date| step(*date, frequency))
        .take(count)
        .collect();
    if dates.len() < count {
        return Err(CalendarError::OutOfRange);
    }
    Ok(dates)
}

/// Midnight UTC of `date`.
pub fn to_timestamp(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Build a date from possibly out-of-range month and day values, carrying
/// the excess into the following months and years.
fn normalized_date(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    let months = year.checked_mul(12)?.checked_add(month.checked_sub(1)?)?;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = u32::try_from(months.rem_euclid(12) + 1).ok()?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_signed(TimeDelta::try_days(day.checked_sub(1)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_each_frequency() {
        assert_eq!(parse_period("1995", Frequency::Annual), Ok(ymd(1995, 1, 1)));
        assert_eq!(parse_period("1995 2", Frequency::Quarterly), Ok(ymd(1995, 6, 1)));
        assert_eq!(parse_period("1995 11", Frequency::Monthly), Ok(ymd(1995, 11, 1)));
        assert_eq!(parse_period("2021 1", Frequency::Weekly), Ok(ymd(2021, 1, 1)));
        assert_eq!(parse_period("2021 3", Frequency::Weekly), Ok(ymd(2021, 3, 3)));
        assert_eq!(parse_period("2020 5", Frequency::Weekly), Ok(ymd(2020, 5, 5)));
        assert_eq!(parse_period("2021 2 28", Frequency::Daily), Ok(ymd(2021, 2, 28)));
    }

    #[test]
    fn extra_components_are_ignored() {
        assert_eq!(parse_period("1995 4", Frequency::Annual), Ok(ymd(1995, 1, 1)));
        assert_eq!(parse_period("2021 3 5", Frequency::Weekly), Ok(ymd(2021, 3, 3)));
    }

    #[test]
    fn overflow_rolls_into_next_period() {
        assert_eq!(parse_period("1995 13", Frequency::Monthly), Ok(ymd(1996, 1, 1)));
        assert_eq!(parse_period("1995 5", Frequency::Quarterly), Ok(ymd(1996, 3, 1)));
        assert_eq!(parse_period("2021 1 32", Frequency::Daily), Ok(ymd(2021, 2, 1)));
        assert_eq!(parse_period("2021 0", Frequency::Monthly), Ok(ymd(2020, 12, 1)));
        assert_eq!(parse_period("2020 20", Frequency::Weekly), Ok(ymd(2021, 8, 20)));
        assert_eq!(parse_period("2021 53", Frequency::Weekly), Ok(ymd(2025, 6, 22)));
    }

    #[test]
    fn rejects_missing_and_non_numeric_components() {
        assert_eq!(
            parse_period("1995", Frequency::Monthly),
            Err(CalendarError::MissingComponent { expected: 2, found: 1 })
        );
        assert_eq!(
            parse_period("1995 M1", Frequency::Monthly),
            Err(CalendarError::InvalidComponent {
                value: "M1".to_string()
            })
        );
        assert_eq!(
            parse_period("", Frequency::Annual),
            Err(CalendarError::MissingComponent { expected: 1, found: 0 })
        );
    }

    #[test]
    fn rejects_out_of_range_year() {
        assert_eq!(
            parse_period("99999999999", Frequency::Annual),
            Err(CalendarError::OutOfRange)
        );
    }

    #[test]
    fn month_step_rolls_like_calendar_addition() {
        assert_eq!(step(ymd(2021, 1, 31), Frequency::Monthly), Some(ymd(2021, 3, 3)));
        assert_eq!(step(ymd(2020, 1, 31), Frequency::Monthly), Some(ymd(2020, 3, 2)));
        assert_eq!(step(ymd(2020, 2, 29), Frequency::Annual), Some(ymd(2021, 3, 1)));
    }

    #[test]
    fn generates_requested_number_of_dates() {
        let dates = observation_dates(ymd(2020, 3, 1), Frequency::Quarterly, 4).unwrap();
        assert_eq!(
            dates,
            vec![ymd(2020, 3, 1), ymd(2020, 6, 1), ymd(2020, 9, 1), ymd(2020, 12, 1)]
        );
        assert!(observation_dates(ymd(2020, 3, 1), Frequency::Daily, 0).unwrap().is_empty());
    }

    #[test]
    fn timestamp_is_midnight_utc() {
        assert_eq!(to_timestamp(ymd(2020, 1, 1)).to_rfc3339(), "2020-01-01T00:00:00+00:00");
    }
}
