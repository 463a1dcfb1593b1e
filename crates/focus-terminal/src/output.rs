//! Output formatting module for focus-stats
//!
//! This module provides formatters for displaying statistics in different formats:
//! - Table format: coloured sections and bar charts for the terminal
//! - JSON format for machine-readable output and integration with other tools
//!
//! A statistics report is laid out as: reporting period header, summary,
//! averages, work history, weekly breakdown, and hourly breakdown. The
//! averages and work history sections are only shown for windows longer than
//! a day, and work history only when some time was logged.

use crate::chart::{BarChart, terminal_width};
use chrono::NaiveTime;
use chrono_tz::Tz;
use colored::Colorize;
use focus_core::aggregation::Report;
use focus_core::types::{Session, mins_to_hours_and_mins};
use prettytable::{Cell, Row, Table, format, row};
use serde_json::json;

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const PERIOD_DATE_FORMAT: &str = "%B %d, %Y";
const LISTING_DATE_FORMAT: &str = "%b %d, %Y %I:%M %p";

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a computed statistics report
    fn format_report(&self, report: &Report) -> String;

    /// Format a session listing; `tz` is used for displayed times
    fn format_sessions(&self, sessions: &[Session], tz: &Tz) -> String;
}

/// Warning shown before sessions are deleted
pub fn delete_prompt() -> String {
    format!(
        "{} The above sessions will be deleted permanently. Press ENTER to proceed",
        "WARNING".black().on_yellow()
    )
}

/// Colour-and-chart formatter for the terminal
pub struct TableFormatter {
    width: usize,
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableFormatter {
    /// Create a formatter sized to the current terminal
    pub fn new() -> Self {
        Self::with_width(terminal_width())
    }

    pub fn with_width(width: usize) -> Self {
        Self { width }
    }

    fn format_hours_and_mins(minutes: u64) -> String {
        let (hours, mins) = mins_to_hours_and_mins(minutes);
        format!(
            "{} {} {} {}",
            hours.to_string().green(),
            "hours".green(),
            mins.to_string().green(),
            "minutes".green()
        )
    }

    fn heading(title: &str) -> String {
        format!("\n{}\n", title.bright_blue())
    }

    fn format_header(report: &Report) -> String {
        let period = format!(
            "Reporting period: {} - {}",
            report.start.format(PERIOD_DATE_FORMAT),
            report.end.format(PERIOD_DATE_FORMAT)
        );
        format!("{}\n", format!(" {period} ").black().on_yellow())
    }

    fn format_summary(report: &Report) -> String {
        let totals = &report.data.totals;
        let mut output = format!("{}\n", "Summary".bright_blue());
        output.push_str(&format!(
            "Total time logged: {}\n",
            Self::format_hours_and_mins(totals.minutes)
        ));
        output.push_str(&format!(
            "Work sessions completed: {}\n",
            totals.completed.to_string().green()
        ));
        output.push_str(&format!(
            "Work sessions abandoned: {}\n",
            totals.abandoned.to_string().green()
        ));
        output
    }

    fn format_averages(report: &Report) -> String {
        let averages = &report.data.averages;
        let mut output = Self::heading("Averages");
        output.push_str(&format!(
            "Average time logged per day: {}\n",
            Self::format_hours_and_mins(averages.minutes)
        ));
        output.push_str(&format!(
            "Completed sessions per day: {}\n",
            averages.completed.to_string().green()
        ));
        output.push_str(&format!(
            "Abandoned sessions per day: {}\n",
            averages.abandoned.to_string().green()
        ));
        output
    }

    fn format_work_history(&self, report: &Report) -> String {
        let chart = report
            .data
            .history_entries()
            .fold(BarChart::new(), |chart, (label, q)| {
                chart.with_bar(label, q.minutes)
            });
        Self::heading("Work history (minutes)") + &chart.render(self.width)
    }

    fn format_weekly_breakdown(&self, report: &Report) -> String {
        let chart = WEEKDAYS
            .iter()
            .zip(report.data.weekday.iter())
            .fold(BarChart::new(), |chart, (day, q)| {
                chart.with_bar(*day, q.minutes)
            });
        Self::heading("Weekly breakdown (minutes)") + &chart.render(self.width)
    }

    fn format_hourly_breakdown(&self, report: &Report) -> String {
        let chart = report
            .data
            .hour_of_day
            .iter()
            .enumerate()
            .fold(BarChart::new(), |chart, (hour, q)| {
                chart.with_bar(hour_label(hour as u32), q.minutes)
            });
        Self::heading("Hourly breakdown (minutes)") + &chart.render(self.width)
    }
}

/// Session name followed by its tags, e.g. `writing [book, draft]`
fn session_label(session: &Session) -> String {
    let name = session.name.as_deref().unwrap_or_default();
    if session.tags.is_empty() {
        name.to_string()
    } else {
        format!("{name} [{}]", session.tags.join(", ")).trim_start().to_string()
    }
}

/// `03:00 PM` style label for an hour of the day
fn hour_label(hour: u32) -> String {
    NaiveTime::from_hms_opt(hour, 0, 0)
        .map(|t| t.format("%I:%M %p").to_string())
        .unwrap_or_else(|| format!("{hour:02}:00"))
}

impl OutputFormatter for TableFormatter {
    fn format_report(&self, report: &Report) -> String {
        let mut output = Self::format_header(report);
        output.push_str(&Self::format_summary(report));

        if report.shows_averages() {
            output.push_str(&Self::format_averages(report));
        }

        if report.shows_history() {
            output.push_str(&self.format_work_history(report));
        }

        output.push_str(&self.format_weekly_breakdown(report));
        output.push_str(&self.format_hourly_breakdown(report));
        output
    }

    fn format_sessions(&self, sessions: &[Session], tz: &Tz) -> String {
        if sessions.is_empty() {
            return format!(
                "{} No sessions found for the specified time range\n",
                "INFO".black().on_cyan()
            );
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        // The label column only appears when some session carries one
        let labelled = sessions
            .iter()
            .any(|s| s.name.is_some() || !s.tags.is_empty());

        let mut titles = row![
            b -> "#",
            b -> "Start date",
            b -> "End date",
            b -> "Status"
        ];
        if labelled {
            titles.add_cell(Cell::new("Label").style_spec("b"));
        }
        table.set_titles(titles);

        for (i, session) in sessions.iter().enumerate() {
            let end_date = session
                .end_time
                .map(|end| end.with_timezone(tz).format(LISTING_DATE_FORMAT).to_string())
                .unwrap_or_default();
            let status = if session.completed {
                Cell::new("completed").style_spec("Fg")
            } else {
                Cell::new("abandoned").style_spec("Fr")
            };

            let mut cells = vec![
                Cell::new(&(i + 1).to_string()).style_spec("r"),
                Cell::new(
                    &session
                        .start_time
                        .with_timezone(tz)
                        .format(LISTING_DATE_FORMAT)
                        .to_string(),
                ),
                Cell::new(&end_date),
                status,
            ];
            if labelled {
                cells.push(Cell::new(&session_label(session)));
            }
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> String {
        let data = &report.data;
        let output = json!({
            "period": {
                "start": report.start.to_rfc3339(),
                "end": report.end.to_rfc3339(),
                "hours": report.hours_diff,
            },
            "granularity": data.granularity,
            "totals": data.totals,
            "averages": data.averages,
            "history": data.history.iter().map(|(key, q)| json!({
                "date": key.first_day().to_string(),
                "label": data.history_label(key),
                "minutes": q.minutes,
                "completed": q.completed,
                "abandoned": q.abandoned,
            })).collect::<Vec<_>>(),
            "weekday": WEEKDAYS.iter().zip(data.weekday.iter()).map(|(day, q)| json!({
                "day": day,
                "minutes": q.minutes,
                "completed": q.completed,
                "abandoned": q.abandoned,
            })).collect::<Vec<_>>(),
            "hour_of_day": data.hour_of_day.iter().enumerate().map(|(hour, q)| json!({
                "hour": hour,
                "minutes": q.minutes,
                "completed": q.completed,
                "abandoned": q.abandoned,
            })).collect::<Vec<_>>(),
        });

        serde_json::to_string_pretty(&output).unwrap_or_default()
    }

    fn format_sessions(&self, sessions: &[Session], _tz: &Tz) -> String {
        let output = json!({ "sessions": sessions });
        serde_json::to_string_pretty(&output).unwrap_or_default()
    }
}

/// Get the appropriate formatter based on output format preference
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new())
    }
}
