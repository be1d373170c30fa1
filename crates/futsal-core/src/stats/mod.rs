//! Match analytics computed from the API data.
//!
//! - `ordering`: selector order and labels for the match list
//! - `timeline`: the attacking timeline and the final score
//! - `events`: per-team event totals and distribution
//! - `metrics`: time parsing and the infographic's attack metrics

pub mod events;
pub mod metrics;
pub mod ordering;
pub mod timeline;

pub use events::{compute_event_stats, EventStats, TeamEventCount, TeamEventDistribution, WHITELIST_EVENTS};
pub use metrics::{
    build_attack_actions, build_minute_matrix, cumulative_participation, ewma, goals_only,
    parse_time_to_seconds, smoothed_curves, top_players, AttackAction, MinuteWeights,
    PlayerParticipation, SmoothedCurves, HALFTIME_MINUTE, MATCH_MINUTES, SMOOTH_TAU_MIN,
    TOP_N_PLAYERS,
};
pub use ordering::{group_rank, sort_matches_for_select, stage_order, unique_labels};
pub use timeline::{process_timeline, score, TimelineRow};
