//! Reporting period resolution
//!
//! Turns a `--period` keyword and optional `--start`/`--end` strings into a
//! concrete [`DateRange`] in local time.
//!
//! # Examples
//!
//! ```
//! use chrono::TimeZone;
//! use chrono_tz::Tz;
//! use focus_core::period::{Period, resolve_range};
//!
//! let now = Tz::UTC.with_ymd_and_hms(2024, 5, 15, 14, 30, 0).unwrap();
//!
//! let range = Period::Last7Days.resolve(now);
//! assert_eq!(range.start.unwrap().to_rfc3339(), "2024-05-09T00:00:00+00:00");
//! assert_eq!(range.end.unwrap().to_rfc3339(), "2024-05-15T23:59:59+00:00");
//!
//! // Explicit bounds override the keyword
//! let range = resolve_range("7days", Some("2024-05-01"), None, now).unwrap();
//! assert_eq!(range.start.unwrap().to_rfc3339(), "2024-05-01T00:00:00+00:00");
//! ```

use crate::error::{FocusError, Result};
use crate::timezone::{end_of_day, localize, start_of_day};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

/// Layout of a full date-time bound, e.g. `2024-05-01 09:30:00 PM`
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %I:%M:%S %p";
/// Layout of a date-only bound
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Named reporting periods accepted by `--period`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Period {
    #[default]
    AllTime,
    Today,
    Yesterday,
    Last7Days,
    Last14Days,
    Last30Days,
    Last90Days,
    Last180Days,
    Last365Days,
}

impl Period {
    /// Every supported period, in the order they are listed to users
    pub const ALL: [Period; 9] = [
        Period::AllTime,
        Period::Today,
        Period::Yesterday,
        Period::Last7Days,
        Period::Last14Days,
        Period::Last30Days,
        Period::Last90Days,
        Period::Last180Days,
        Period::Last365Days,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::AllTime => "all-time",
            Period::Today => "today",
            Period::Yesterday => "yesterday",
            Period::Last7Days => "7days",
            Period::Last14Days => "14days",
            Period::Last30Days => "30days",
            Period::Last90Days => "90days",
            Period::Last180Days => "180days",
            Period::Last365Days => "365days",
        }
    }

    /// Length of an N-day window ending today, if this is one
    fn days(&self) -> Option<i64> {
        match self {
            Period::Last7Days => Some(7),
            Period::Last14Days => Some(14),
            Period::Last30Days => Some(30),
            Period::Last90Days => Some(90),
            Period::Last180Days => Some(180),
            Period::Last365Days => Some(365),
            _ => None,
        }
    }

    /// Resolve the period relative to `now`
    ///
    /// The window ends at 23:59:59 today (yesterday for [`Period::Yesterday`]).
    /// N-day windows include today and start at midnight. [`Period::Today`]
    /// starts at `now` itself, and [`Period::AllTime`] leaves both bounds open.
    pub fn resolve(self, now: DateTime<Tz>) -> DateRange {
        let tz = now.timezone();
        let today = now.date_naive();

        match self {
            Period::AllTime => DateRange::unbounded(),
            Period::Today => DateRange::new(Some(now), Some(end_of_day(&tz, today))),
            Period::Yesterday => {
                let yesterday = today - Duration::days(1);
                DateRange::new(
                    Some(start_of_day(&tz, yesterday)),
                    Some(end_of_day(&tz, yesterday)),
                )
            }
            _ => {
                let days = self.days().unwrap_or(1);
                let first_day = today - Duration::days(days - 1);
                DateRange::new(
                    Some(start_of_day(&tz, first_day)),
                    Some(end_of_day(&tz, today)),
                )
            }
        }
    }

    /// Comma-separated list of every keyword, for error messages and help
    pub fn keywords() -> String {
        Self::ALL
            .iter()
            .map(Period::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Period {
    type Err = FocusError;

    /// An empty keyword means all-time
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Period::AllTime);
        }

        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| FocusError::InvalidPeriodKeyword(Self::keywords()))
    }
}

/// A reporting window; `None` bounds are open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateTime<Tz>>,
    pub end: Option<DateTime<Tz>>,
}

impl DateRange {
    pub fn new(start: Option<DateTime<Tz>>, end: Option<DateTime<Tz>>) -> Self {
        Self { start, end }
    }

    pub fn unbounded() -> Self {
        Self::new(None, None)
    }

    /// Fails with [`FocusError::InvalidDateRange`] when both bounds are set and
    /// the end precedes the start
    pub fn validate(self) -> Result<Self> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end < start => Err(FocusError::InvalidDateRange),
            _ => Ok(self),
        }
    }
}

/// Which end of the window a date string bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

/// Parse a `--start`/`--end` value in the zone of `tz`
///
/// A date-only start means 12:00:00 AM of that day, a date-only end means
/// 11:59:59 PM.
pub fn parse_date_bound(input: &str, bound: Bound, tz: &Tz) -> Result<DateTime<Tz>> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        return Ok(match bound {
            Bound::Start => start_of_day(tz, date),
            Bound::End => end_of_day(tz, date),
        });
    }

    let naive = NaiveDateTime::parse_from_str(input, DATE_TIME_FORMAT)
        .map_err(|_| FocusError::InvalidDateFormat)?;
    Ok(localize(tz, naive))
}

/// Resolve the CLI inputs into a validated window
///
/// `period` is validated first; non-empty `start`/`end` strings then replace
/// the corresponding bound. A start without an end is closed at 23:59:59
/// today, so a start in the future is an invalid range.
pub fn resolve_range(
    period: &str,
    start: Option<&str>,
    end: Option<&str>,
    now: DateTime<Tz>,
) -> Result<DateRange> {
    let tz = now.timezone();
    let mut range = period.parse::<Period>()?.resolve(now);

    if let Some(start) = start.map(str::trim).filter(|s| !s.is_empty()) {
        range.start = Some(parse_date_bound(start, Bound::Start, &tz)?);
    }

    if let Some(end) = end.map(str::trim).filter(|s| !s.is_empty()) {
        range.end = Some(parse_date_bound(end, Bound::End, &tz)?);
    }

    // An explicit start with an open end runs until the end of today
    if range.start.is_some() && range.end.is_none() {
        range.end = Some(end_of_day_of(now));
    }

    range.validate()
}

/// Midnight at the start of the local day containing `instant`
pub fn midnight_of(instant: DateTime<Tz>) -> DateTime<Tz> {
    start_of_day(&instant.timezone(), instant.date_naive())
}

/// 23:59:59 of the local day containing `instant`
pub fn end_of_day_of(instant: DateTime<Tz>) -> DateTime<Tz> {
    end_of_day(&instant.timezone(), instant.date_naive())
}
