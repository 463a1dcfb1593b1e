//! Aggregation of work sessions into time buckets
//!
//! [`Data`] holds per-hour-of-day, per-weekday, and per-calendar-bucket
//! [`Quantity`] values for one reporting window, plus totals and per-day
//! averages.
//!
//! Session time is distributed analytically: each timeline entry is clipped
//! to the window and split at local hour boundaries, so every piece falls in
//! exactly one hour, one weekday, and one history bucket. Seconds are summed
//! per bucket for each session and rounded to whole minutes before being added
//! to the bucket.
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use chrono_tz::Tz;
//! use focus_core::aggregation::{Data, Granularity};
//! use focus_core::types::{Session, TimelineEntry};
//!
//! let tz = Tz::UTC;
//! let start = tz.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
//! let end = tz.with_ymd_and_hms(2024, 5, 7, 23, 59, 59).unwrap();
//!
//! let from = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();
//! let to = Utc.with_ymd_and_hms(2024, 5, 2, 9, 25, 0).unwrap();
//! let session = Session {
//!     start_time: from,
//!     end_time: Some(to),
//!     completed: true,
//!     timeline: vec![TimelineEntry { start_time: from, end_time: to }],
//!     name: None,
//!     tags: vec![],
//! };
//!
//! let data = Data::compute(&[session], start, end);
//! assert_eq!(data.granularity, Granularity::Day);
//! assert_eq!(data.totals.minutes, 25);
//! assert_eq!(data.hour_of_day[9].completed, 1);
//! ```

use crate::period::end_of_day_of;
use crate::types::{MINUTES_IN_AN_HOUR, Quantity, Session, round_time};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

pub const HOURS_IN_A_DAY: i64 = 24;
/// Longest month (31 days)
pub const MAX_HOURS_IN_A_MONTH: i64 = 744;
/// Longest year (366 days)
pub const MAX_HOURS_IN_A_YEAR: i64 = 8784;

const SECONDS_IN_A_MINUTE: f64 = MINUTES_IN_AN_HOUR as f64;

/// Length of `end - start` in hours, rounded to the nearest hour
pub fn hours_between(start: DateTime<Tz>, end: DateTime<Tz>) -> i64 {
    ((end - start).num_seconds() as f64 / 3600.0).round() as i64
}

/// Calendar size of the work-history buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Month,
    Year,
}

impl Granularity {
    /// Pick the bucket size for a window of `hours_diff` hours
    ///
    /// Windows longer than a day and at most a month get daily buckets,
    /// windows longer than a year get yearly buckets, and everything else is
    /// bucketed by month.
    pub fn for_hours(hours_diff: i64) -> Self {
        if hours_diff > HOURS_IN_A_DAY && hours_diff <= MAX_HOURS_IN_A_MONTH {
            Granularity::Day
        } else if hours_diff > MAX_HOURS_IN_A_YEAR {
            Granularity::Year
        } else {
            Granularity::Month
        }
    }

    /// strftime layout of the bucket labels
    pub fn label_format(&self) -> &'static str {
        match self {
            Granularity::Day => "%B %d, %Y",
            Granularity::Month => "%B %Y",
            Granularity::Year => "%Y",
        }
    }

    /// Bucket containing the local calendar date `date`
    pub fn key_for(&self, date: NaiveDate) -> HistoryKey {
        let first = match self {
            Granularity::Day => Some(date),
            Granularity::Month => date.with_day(1),
            Granularity::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        };
        HistoryKey(first.unwrap_or(date))
    }

    pub fn label(&self, key: &HistoryKey) -> String {
        key.0.format(self.label_format()).to_string()
    }
}

/// Work-history bucket, identified by its first calendar day
///
/// Keys order chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HistoryKey(NaiveDate);

impl HistoryKey {
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }
}

/// Computed statistics for one reporting window
#[derive(Debug, Clone)]
pub struct Data {
    /// Indexed by days from Sunday (0 = Sunday, 6 = Saturday)
    pub weekday: [Quantity; 7],
    /// Indexed by local hour (0-23)
    pub hour_of_day: [Quantity; 24],
    /// Pre-populated for the whole window; see [`Data::new`]
    pub history: BTreeMap<HistoryKey, Quantity>,
    pub granularity: Granularity,
    pub totals: Quantity,
    pub averages: Quantity,
    tz: Tz,
}

impl Data {
    /// Create empty statistics for `[start, end]`
    ///
    /// History is pre-populated with the bucket of every instant reached by
    /// stepping from `start` to `end` in 24-hour increments. Buckets coarser
    /// than a day collect several steps under one key.
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>, hours_diff: i64) -> Self {
        let granularity = Granularity::for_hours(hours_diff);

        let mut history = BTreeMap::new();
        let mut date = start;
        while date <= end {
            history.insert(granularity.key_for(date.date_naive()), Quantity::default());
            date += Duration::hours(HOURS_IN_A_DAY);
        }

        debug!(
            "Initialised {} {:?} history buckets for {} hours",
            history.len(),
            granularity,
            hours_diff
        );

        Self {
            weekday: [Quantity::default(); 7],
            hour_of_day: [Quantity::default(); 24],
            history,
            granularity,
            totals: Quantity::default(),
            averages: Quantity::default(),
            tz: start.timezone(),
        }
    }

    /// Build the statistics for `sessions` over `[start, end]` in one step
    pub fn compute(sessions: &[Session], start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        let mut data = Self::new(start, end, hours_between(start, end));
        data.compute_totals(sessions, start, end);
        data.compute_averages(start, end);
        data
    }

    /// Label of a history bucket in this instance's granularity
    pub fn history_label(&self, key: &HistoryKey) -> String {
        self.granularity.label(key)
    }

    /// History buckets in chronological order with their labels
    pub fn history_entries(&self) -> impl Iterator<Item = (String, &Quantity)> + '_ {
        self.history
            .iter()
            .map(|(key, quantity)| (self.history_label(key), quantity))
    }

    /// Add every finished session to the buckets and totals
    ///
    /// Sessions without an end time are skipped. Completed and abandoned
    /// counters are attributed to the bucket of the session's start; minutes
    /// are attributed to the buckets the session actually ran in.
    pub fn compute_totals(&mut self, sessions: &[Session], start: DateTime<Tz>, end: DateTime<Tz>) {
        let window_start = start.with_timezone(&Utc);
        let window_end = end.with_timezone(&Utc);

        for session in sessions.iter().filter(|s| !s.is_in_progress()) {
            let seconds = self.distribute_session(session, window_start, window_end);
            let duration = round_time(seconds / SECONDS_IN_A_MINUTE);

            let started = session.start_time.with_timezone(&self.tz);
            let key = self.granularity.key_for(started.date_naive());
            let weekday = started.weekday().num_days_from_sunday() as usize;
            let hour = started.hour() as usize;

            tally(&mut self.weekday[weekday], session.completed);
            tally(&mut self.hour_of_day[hour], session.completed);
            if let Some(bucket) = self.history.get_mut(&key) {
                tally(bucket, session.completed);
            }
            tally(&mut self.totals, session.completed);
            self.totals.minutes += duration;
        }
    }

    /// Spread the in-window time of `session` over the minute buckets and
    /// return the number of seconds counted
    fn distribute_session(
        &mut self,
        session: &Session,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> f64 {
        let mut hourly = [0f64; 24];
        let mut weekday = [0f64; 7];
        let mut daily: BTreeMap<HistoryKey, f64> = BTreeMap::new();
        let mut seconds = 0.0;

        for entry in &session.timeline {
            let from = entry.start_time.max(window_start);
            let to = entry.end_time.min(window_end);
            if to <= from {
                continue;
            }

            let mut cursor = from;
            while cursor < to {
                let local = cursor.with_timezone(&self.tz);
                let into_hour = Duration::seconds(i64::from(local.minute() * 60 + local.second()))
                    + Duration::nanoseconds(i64::from(local.nanosecond()));
                let piece_end = (cursor - into_hour + Duration::hours(1)).min(to);
                if piece_end <= cursor {
                    break;
                }

                let secs = (piece_end - cursor).num_milliseconds() as f64 / 1000.0;
                hourly[local.hour() as usize] += secs;
                weekday[local.weekday().num_days_from_sunday() as usize] += secs;
                *daily
                    .entry(self.granularity.key_for(local.date_naive()))
                    .or_default() += secs;
                seconds += secs;

                cursor = piece_end;
            }
        }

        for (bucket, secs) in self.hour_of_day.iter_mut().zip(hourly) {
            bucket.minutes += round_time(secs / SECONDS_IN_A_MINUTE);
        }
        for (bucket, secs) in self.weekday.iter_mut().zip(weekday) {
            bucket.minutes += round_time(secs / SECONDS_IN_A_MINUTE);
        }
        for (key, secs) in daily {
            // Buckets outside the pre-populated window are dropped
            if let Some(bucket) = self.history.get_mut(&key) {
                bucket.minutes += round_time(secs / SECONDS_IN_A_MINUTE);
            }
        }

        seconds
    }

    /// Per-day averages of the totals
    ///
    /// The day count spans `start` to the end of `end`'s day. It is never
    /// less than one, so windows shorter than a day average over one day.
    pub fn compute_averages(&mut self, start: DateTime<Tz>, end: DateTime<Tz>) {
        let number_of_days = (hours_between(start, end_of_day_of(end)) / HOURS_IN_A_DAY).max(1);
        let per_day = |total: u64| round_time(total as f64 / number_of_days as f64);

        self.averages = Quantity {
            minutes: per_day(self.totals.minutes),
            completed: per_day(self.totals.completed),
            abandoned: per_day(self.totals.abandoned),
        };
    }
}

fn tally(quantity: &mut Quantity, completed: bool) {
    if completed {
        quantity.completed += 1;
    } else {
        quantity.abandoned += 1;
    }
}

/// A computed report ready for display
#[derive(Debug, Clone)]
pub struct Report {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub hours_diff: i64,
    pub data: Data,
}

impl Report {
    /// Averages are only meaningful for windows longer than a day
    pub fn shows_averages(&self) -> bool {
        self.hours_diff > HOURS_IN_A_DAY
    }

    pub fn shows_history(&self) -> bool {
        self.hours_diff > HOURS_IN_A_DAY && self.data.totals.minutes > 0
    }
}
