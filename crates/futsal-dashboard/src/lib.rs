//! Futsal Dashboard - browser dashboard for FIFA Futsal World Cup data.
//!
//! Serves the Home, Timeline, Statistics and Infographic pages behind a
//! cookie login. Data comes from `futsal-core`.

pub mod error;
pub mod render;
pub mod routes;
pub mod session;
pub mod state;

pub use routes::build_router;
pub use state::{AppState, SessionSettings};
