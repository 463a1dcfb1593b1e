//! Terminal output formatting for focus-stats
//!
//! This crate provides the table/bar-chart and JSON formatters for
//! statistics reports and session listings.

pub mod chart;
pub mod output;

pub use output::{JsonFormatter, OutputFormatter, TableFormatter, delete_prompt, get_formatter};
