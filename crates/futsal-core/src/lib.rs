//! Futsal Core - data layer for the FIFA Futsal World Cup dashboard.
//!
//! This crate contains everything that does not depend on the web server:
//! the FIFA API client, the in-process response cache, session types,
//! configuration, data models and the match analytics.

pub mod api;
pub mod auth;
pub mod cache;
pub mod colors;
pub mod config;
pub mod models;
pub mod service;
pub mod stats;
pub mod utils;

pub use api::{ApiClient, FetchError};
pub use cache::{CachedData, ResponseCache};
pub use config::Config;
pub use service::{FutsalData, MatchDatasets};
