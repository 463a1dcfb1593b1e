//! focus-stats - Statistics for focus timer work sessions
//!
//! This library provides functionality to:
//! - Resolve named reporting periods and explicit date bounds
//! - Aggregate sessions into hourly, weekday, and calendar buckets
//! - Generate reports and session listings in table and JSON formats
//! - Delete the sessions recorded in a window
//!
//! # Examples
//!
//! ```no_run
//! use focus_stats::{
//!     period::resolve_range,
//!     stats::Stats,
//!     timezone::TimezoneConfig,
//! };
//! use focus_store::JsonlStore;
//! use focus_terminal::get_formatter;
//!
//! fn main() -> focus_stats::Result<()> {
//!     let now = TimezoneConfig::default().now();
//!     let range = resolve_range("7days", None, None, now)?;
//!
//!     let mut stats = Stats::new(JsonlStore::new()?, range, now, get_formatter(false));
//!     stats.show(&mut std::io::stdout())?;
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod stats;

// Re-export the core modules under the binary crate
pub use focus_core::{aggregation, error, period, source, timezone, types};

// Re-export commonly used types
pub use focus_core::{FocusError, Quantity, Result, Session, TimelineEntry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
