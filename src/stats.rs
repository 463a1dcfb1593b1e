//! Statistics commands
//!
//! [`Stats`] carries the state of one invocation: the reporting window, the
//! sessions fetched for it, and the computed [`Data`]. It drives the
//! fetch → compute → render sequence for `show`, `list`, and `delete`.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use focus_core::aggregation::{Data, Report, hours_between};
use focus_core::error::Result;
use focus_core::period::{DateRange, end_of_day_of, midnight_of};
use focus_core::source::SessionSource;
use focus_core::types::Session;
use focus_terminal::{OutputFormatter, delete_prompt};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Closes the wrapped source when dropped
struct CloseOnDrop<'a, S: SessionSource>(&'a mut S);

impl<S: SessionSource> Drop for CloseOnDrop<'_, S> {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// Per-invocation statistics context
pub struct Stats<S: SessionSource> {
    /// `None` until re-anchored by [`Stats::show`] for all-time windows
    pub start_time: Option<DateTime<Tz>>,
    pub end_time: Option<DateTime<Tz>>,
    pub sessions: Vec<Session>,
    pub data: Option<Data>,
    pub hours_diff: i64,
    now: DateTime<Tz>,
    store: S,
    formatter: Box<dyn OutputFormatter>,
}

impl<S: SessionSource> Stats<S> {
    /// Create the context for `range`; `now` fixes the current instant and
    /// the display timezone
    pub fn new(
        store: S,
        range: DateRange,
        now: DateTime<Tz>,
        formatter: Box<dyn OutputFormatter>,
    ) -> Self {
        Self {
            start_time: range.start,
            end_time: range.end,
            sessions: Vec::new(),
            data: None,
            hours_diff: 0,
            now,
            store,
            formatter,
        }
    }

    pub fn timezone(&self) -> Tz {
        self.now.timezone()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Compute and render the statistics report
    ///
    /// The session source is closed before this returns, whether or not the
    /// report could be built.
    pub fn show(&mut self, w: &mut impl Write) -> Result<()> {
        let guard = CloseOnDrop(&mut self.store);

        self.sessions = fetch_sessions(&*guard.0, self.start_time, self.end_time)?;

        let tz = self.now.timezone();
        let start = match self.start_time {
            Some(start) => start,
            None => self
                .sessions
                .iter()
                .map(|s| s.start_time)
                .min()
                .map(|first| midnight_of(first.with_timezone(&tz)))
                .unwrap_or_else(|| midnight_of(self.now)),
        };
        let end = self.end_time.unwrap_or_else(|| end_of_day_of(self.now));
        self.start_time = Some(start);
        self.end_time = Some(end);
        self.hours_diff = hours_between(start, end);

        info!(
            "Computing statistics for {} sessions over {} hours",
            self.sessions.len(),
            self.hours_diff
        );

        let mut data = Data::new(start, end, self.hours_diff);
        data.compute_totals(&self.sessions, start, end);
        data.compute_averages(start, end);

        let report = Report {
            start,
            end,
            hours_diff: self.hours_diff,
            data,
        };
        writeln!(w, "{}", self.formatter.format_report(&report))?;
        self.data = Some(report.data);

        Ok(())
    }

    /// Render the sessions in the window, or a notice when there are none
    pub fn list(&mut self, w: &mut impl Write) -> Result<()> {
        self.sessions = fetch_sessions(&self.store, self.start_time, self.end_time)?;
        let tz = self.timezone();
        write!(w, "{}", self.formatter.format_sessions(&self.sessions, &tz))?;
        Ok(())
    }

    /// List the sessions in the window, wait for one line of confirmation
    /// on `r`, then delete them
    ///
    /// Nothing is prompted for or deleted when the window holds no sessions.
    pub fn delete(&mut self, w: &mut impl Write, mut r: impl BufRead) -> Result<()> {
        self.list(w)?;

        if self.sessions.is_empty() {
            debug!("Nothing to delete");
            return Ok(());
        }

        write!(w, "{}", delete_prompt())?;
        w.flush()?;

        let mut confirmation = String::new();
        r.read_line(&mut confirmation)?;

        let (start, end) = utc_bounds(self.start_time, self.end_time);
        self.store.delete_sessions(start, end)?;
        info!("Deleted {} sessions", self.sessions.len());

        Ok(())
    }
}

fn utc_bounds(
    start: Option<DateTime<Tz>>,
    end: Option<DateTime<Tz>>,
) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    (
        start.map(|t| t.with_timezone(&Utc)),
        end.map(|t| t.with_timezone(&Utc)),
    )
}

/// Fetch and decode every session in the window
///
/// A record that fails to decode aborts the whole fetch.
fn fetch_sessions<S: SessionSource>(
    store: &S,
    start: Option<DateTime<Tz>>,
    end: Option<DateTime<Tz>>,
) -> Result<Vec<Session>> {
    let (start, end) = utc_bounds(start, end);
    let records = store.get_sessions(start, end)?;

    let sessions = records
        .iter()
        .map(|record| serde_json::from_str::<Session>(record))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    debug!("Decoded {} sessions", sessions.len());
    Ok(sessions)
}
