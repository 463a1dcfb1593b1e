//! Core domain types for focus-stats
//!
//! Work sessions as the timer records them, and the [`Quantity`]
//! accumulator the aggregator fills per bucket.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::ops::AddAssign;

/// Minutes in an hour
pub const MINUTES_IN_AN_HOUR: u64 = 60;

/// One contiguous span during which a session was actively running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// A recorded work session
///
/// A paused and resumed session has several [`TimelineEntry`] values, in
/// time order and disjoint. `end_time` is `None` while the session is still
/// running.
///
/// # Examples
/// ```
/// use focus_core::types::Session;
///
/// let json = r#"{
///     "start_time": "2024-03-04T09:00:00Z",
///     "end_time": "0001-01-01T00:00:00Z",
///     "completed": false,
///     "timeline": []
/// }"#;
/// let session: Session = serde_json::from_str(json).unwrap();
/// assert!(session.is_in_progress());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub start_time: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "deserialize_end_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    /// Optional label given when the session was started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Session {
    /// Whether the session has not been stopped yet
    pub fn is_in_progress(&self) -> bool {
        self.end_time.is_none()
    }
}

/// Accepts `null`, a missing field, or the zero instant `0001-01-01T00:00:00Z`
/// as "not ended".
fn deserialize_end_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(value.filter(|dt| dt.year() > 1))
}

/// Accumulated work for one bucket
///
/// # Examples
/// ```
/// use focus_core::types::Quantity;
///
/// let mut total = Quantity::default();
/// total += Quantity { minutes: 25, completed: 1, abandoned: 0 };
/// total += Quantity { minutes: 10, completed: 0, abandoned: 1 };
/// assert_eq!(total, Quantity { minutes: 35, completed: 1, abandoned: 1 });
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    pub minutes: u64,
    pub completed: u64,
    pub abandoned: u64,
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, other: Self) {
        self.minutes += other.minutes;
        self.completed += other.completed;
        self.abandoned += other.abandoned;
    }
}

/// Express a minutes value as whole hours and remaining minutes
///
/// ```
/// use focus_core::types::mins_to_hours_and_mins;
///
/// assert_eq!(mins_to_hours_and_mins(135), (2, 15));
/// ```
pub fn mins_to_hours_and_mins(val: u64) -> (u64, u64) {
    (val / MINUTES_IN_AN_HOUR, val % MINUTES_IN_AN_HOUR)
}

/// Round a fractional time value to the nearest whole unit, halves away from zero
pub(crate) fn round_time(t: f64) -> u64 {
    if t <= 0.0 { 0 } else { t.round() as u64 }
}
