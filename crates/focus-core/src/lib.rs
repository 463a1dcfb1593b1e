//! Core types, traits, and utilities for focus-stats
//!
//! This crate provides the session model, error handling, timezone
//! configuration, period resolution, and the bucket aggregation engine
//! used by the other focus-stats crates.

pub mod aggregation;
pub mod error;
pub mod period;
pub mod source;
pub mod timezone;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{FocusError, Result};
pub use types::{Quantity, Session, TimelineEntry};
