//! Session source trait
//!
//! Storage backends implement [`SessionSource`] so the statistics commands
//! can fetch and delete sessions without knowing where they live.

use crate::error::Result;
use chrono::{DateTime, Utc};

/// Access to recorded work sessions.
///
/// Calls are blocking. Bounds of `None` are open.
pub trait SessionSource {
    /// Serialized session records whose start falls inside the range, oldest
    /// first. Each record is decoded by the caller.
    fn get_sessions(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<String>>;

    /// Remove every session whose start falls inside the range
    fn delete_sessions(
        &mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<()>;

    /// Release the underlying resources. Calling it more than once is a no-op.
    fn close(&mut self);
}
