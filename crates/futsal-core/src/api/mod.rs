//! REST API client module for the FIFA data API.
//!
//! This module provides the `ApiClient` for fetching match calendars,
//! timelines, squads, teams and flag images, and the `ApiRequest`
//! descriptions whose fingerprints key the response cache.

pub mod client;
pub mod error;
pub mod request;

pub use client::ApiClient;
pub use error::FetchError;
pub use request::{flag_endpoint, ApiRequest};
