//! In-process response caching.
//!
//! This module provides the `ResponseCache` that memoizes successful API
//! fetches for a per-call time-to-live, so page reloads do not hit the
//! network again. Nothing is persisted; the cache lives as long as the
//! process.

pub mod response;

pub use response::{CachedData, ResponseCache};
