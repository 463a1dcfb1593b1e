//! Session storage for focus-stats
//!
//! Provides [`JsonlStore`], a [`SessionSource`](focus_core::source::SessionSource)
//! backed by a line-delimited JSON file.

pub mod jsonl;

pub use jsonl::JsonlStore;
