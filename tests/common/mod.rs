//! Common test utilities and helpers for focus-stats tests
//!
//! This module provides an in-memory session source and session builders
//! shared by the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use focus_stats::source::SessionSource;
use focus_stats::{Result, Session, TimelineEntry};
use once_cell::sync::Lazy;
use std::sync::Mutex;

// Global mutex to serialize environment variable modifications in tests
pub static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Builder for creating test Session instances
pub struct SessionBuilder {
    start: DateTime<Utc>,
    spans: Vec<(i64, i64)>,
    completed: bool,
    in_progress: bool,
    name: Option<String>,
}

impl SessionBuilder {
    /// A session starting at `start`, by default one unpaused 25 minute run
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            spans: vec![(0, 25)],
            completed: true,
            in_progress: false,
            name: None,
        }
    }

    /// Start at a wall-clock time in `tz`
    pub fn at(tz: Tz, y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Self {
        let start = tz
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .single()
            .expect("unambiguous local time")
            .with_timezone(&Utc);
        Self::new(start)
    }

    pub fn minutes(mut self, minutes: i64) -> Self {
        self.spans = vec![(0, minutes)];
        self
    }

    /// Running spans as (offset, length) in minutes from the start
    pub fn spans(mut self, spans: &[(i64, i64)]) -> Self {
        self.spans = spans.to_vec();
        self
    }

    pub fn abandoned(mut self) -> Self {
        self.completed = false;
        self
    }

    pub fn in_progress(mut self) -> Self {
        self.in_progress = true;
        self.completed = false;
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn build(self) -> Session {
        let timeline: Vec<TimelineEntry> = self
            .spans
            .iter()
            .map(|&(offset, length)| TimelineEntry {
                start_time: self.start + Duration::minutes(offset),
                end_time: self.start + Duration::minutes(offset + length),
            })
            .collect();
        let end_time = if self.in_progress {
            None
        } else {
            timeline.last().map(|t| t.end_time).or(Some(self.start))
        };

        Session {
            start_time: self.start,
            end_time,
            completed: self.completed,
            timeline,
            name: self.name,
            tags: Vec::new(),
        }
    }
}

/// In-memory session source that records the calls made on it
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub sessions: Vec<Session>,
    /// Raw records served after the sessions, e.g. to inject bad data
    pub extra_records: Vec<String>,
    pub delete_calls: Vec<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)>,
    pub close_calls: u32,
}

impl MemoryStore {
    pub fn with_sessions(sessions: Vec<Session>) -> Self {
        Self {
            sessions,
            ..Default::default()
        }
    }
}

fn in_range(t: DateTime<Utc>, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> bool {
    start.is_none_or(|s| t >= s) && end.is_none_or(|e| t <= e)
}

impl SessionSource for MemoryStore {
    fn get_sessions(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<String>> {
        let mut sessions: Vec<&Session> = self
            .sessions
            .iter()
            .filter(|s| in_range(s.start_time, start, end))
            .collect();
        sessions.sort_by_key(|s| s.start_time);

        let mut records = sessions
            .into_iter()
            .map(serde_json::to_string)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        records.extend(self.extra_records.iter().cloned());
        Ok(records)
    }

    fn delete_sessions(
        &mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<()> {
        self.delete_calls.push((start, end));
        self.sessions.retain(|s| !in_range(s.start_time, start, end));
        Ok(())
    }

    fn close(&mut self) {
        self.close_calls += 1;
    }
}
