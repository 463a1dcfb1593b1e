//! Error types for focus-stats
//!
//! This module defines the error types used throughout the focus-stats crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use focus_core::error::{FocusError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to FocusError::Storage
//!     let _file = std::fs::read_to_string("nonexistent.txt")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Main error type for focus-stats operations
///
/// User-input validation failures, storage failures, and record
/// deserialization failures all abort the current command.
#[derive(Error, Debug)]
pub enum FocusError {
    /// A `--start` or `--end` value matched none of the accepted layouts
    #[error("The specified date format must be: YYYY-MM-DD or YYYY-MM-DD HH:MM:SS PM")]
    InvalidDateFormat,

    /// The resolved end precedes the resolved start
    #[error("The end date must not be earlier than the start date")]
    InvalidDateRange,

    /// Unknown `--period` keyword
    #[error("Period must be one of: {0}")]
    InvalidPeriodKeyword(String),

    /// Invalid timezone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// IO failure in the session source
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A session record could not be (de)serialized
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// No usable data directory could be determined
    #[error("No data directory found for focus sessions")]
    NoDataDirectory,
}

/// Convenience type alias for Results in focus-stats
///
/// # Example
///
/// ```
/// use focus_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, FocusError>;
