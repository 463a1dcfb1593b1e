//! CLI interface for focus-stats
//!
//! This module defines the command-line interface using clap. The reporting
//! window options are global so they can be given before or after the
//! subcommand, and `show` runs when no subcommand is given.
//!
//! # Example
//!
//! ```bash
//! # Statistics for the last 30 days
//! focus-stats --period 30days
//!
//! # List the sessions started in March 2024
//! focus-stats list --start 2024-03-01 --end 2024-03-31
//!
//! # Delete everything recorded yesterday
//! focus-stats delete -p yesterday
//! ```

use clap::{Parser, Subcommand};

/// Statistics for focus timer work sessions
#[derive(Parser, Debug, Clone)]
#[command(name = "focus-stats")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Named reporting period: all-time, today, yesterday, 7days, 14days,
    /// 30days, 90days, 180days, 365days
    #[arg(long, short = 'p', default_value = "", hide_default_value = true, global = true)]
    pub period: String,

    /// Start of the window (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS PM")
    #[arg(long, short = 's', global = true)]
    pub start: Option<String>,

    /// End of the window (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS PM")
    #[arg(long, short = 'e', global = true)]
    pub end: Option<String>,

    /// Timezone for bucketing and display (e.g. "America/New_York", "Asia/Tokyo", "UTC")
    /// If not specified, uses the system's local timezone
    #[arg(long, short = 'z', global = true)]
    pub timezone: Option<String>,

    /// Use UTC (overrides --timezone)
    #[arg(long, global = true)]
    pub utc: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Show statistics for the reporting window (default)
    #[default]
    Show,
    /// List the sessions in the reporting window
    List,
    /// Delete the sessions in the reporting window after confirmation
    Delete,
}

impl Cli {
    /// The subcommand to run, `show` if none was given
    pub fn command(&self) -> Command {
        self.command.unwrap_or_default()
    }
}
