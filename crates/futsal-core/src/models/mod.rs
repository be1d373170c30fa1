//! Data models for FIFA API entities.
//!
//! This module contains the records decoded from the API payloads:
//!
//! - `Match`: a calendar fixture with both teams and the kickoff
//! - `MatchEvent`, `Player`: timeline entries and squad members
//! - `Team`, `FlagAsset`: season teams and their (optional) flag images
//!
//! Decoding is lenient; missing fields become empty strings.

pub mod event;
pub mod json;
pub mod matches;
pub mod team;

pub use event::{parse_events, parse_squad, MatchEvent, Player, ATTEMPT_AT_GOAL, GOAL};
pub use matches::{parse_kickoff, parse_matches, Match};
pub use team::{abbreviations_by_team_id, parse_teams, FlagAsset, FlagImage, Team};
