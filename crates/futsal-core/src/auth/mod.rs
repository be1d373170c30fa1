//! Authentication module for dashboard logins and sessions.
//!
//! This module provides:
//! - `SessionData`: an opaque-token session with its creation time
//! - `SessionStore`: client-side session storage (set/get/clear)
//! - `UserDirectory`: the accounts allowed to log in
//!
//! Sessions live in the browser; the server keeps no session table.

pub mod session;
pub mod users;

pub use session::{MemorySessionStore, SessionData, SessionStore};
pub use users::UserDirectory;
