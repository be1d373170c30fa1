use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Match, MatchEvent};

/// Event types broken down on the statistics page
pub const WHITELIST_EVENTS: [&str; 5] = ["Attempt at Goal", "Foul", "Goal!", "Assist", "Corner"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamEventCount {
    pub team_id: String,
    pub team_name: String,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamEventDistribution {
    pub team_id: String,
    pub team_name: String,
    /// Counts in `WHITELIST_EVENTS` order
    pub counts: Vec<usize>,
}

/// Per-team statistics of a match, home first then away
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventStats {
    pub counts: Vec<TeamEventCount>,
    pub distribution: Vec<TeamEventDistribution>,
}

/// Count all events per team and the whitelisted event types per team.
/// Events of teams not playing the match are ignored.
pub fn compute_event_stats(events: &[MatchEvent], m: &Match) -> EventStats {
    let teams = [(&m.home_id, &m.home_name), (&m.away_id, &m.away_name)];

    let mut totals: HashMap<&str, usize> = HashMap::new();
    let mut by_type: HashMap<(&str, &str), usize> = HashMap::new();
    for e in events {
        *totals.entry(e.team_id.as_str()).or_insert(0) += 1;
        if WHITELIST_EVENTS.contains(&e.description.as_str()) {
            *by_type
                .entry((e.team_id.as_str(), e.description.as_str()))
                .or_insert(0) += 1;
        }
    }

    let counts = teams
        .iter()
        .map(|(id, name)| TeamEventCount {
            team_id: id.to_string(),
            team_name: name.to_string(),
            total: totals.get(id.as_str()).copied().unwrap_or(0),
        })
        .collect();

    let distribution = teams
        .iter()
        .map(|(id, name)| TeamEventDistribution {
            team_id: id.to_string(),
            team_name: name.to_string(),
            counts: WHITELIST_EVENTS
                .iter()
                .map(|evt| by_type.get(&(id.as_str(), *evt)).copied().unwrap_or(0))
                .collect(),
        })
        .collect();

    EventStats { counts, distribution }
}
