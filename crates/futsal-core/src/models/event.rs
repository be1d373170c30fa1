use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::json::{array_field, localized, str_field};

/// Event description for a goal
pub const GOAL: &str = "Goal!";

/// Event description for a shot
pub const ATTEMPT_AT_GOAL: &str = "Attempt at Goal";

/// One entry of a match timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub team_id: String,
    pub player_id: String,
    pub description: String,
    /// As delivered by the API, e.g. `12'`
    pub match_minute: String,
}

impl MatchEvent {
    pub fn from_json(e: &Value) -> Self {
        Self {
            team_id: str_field(e, "IdTeam"),
            player_id: str_field(e, "IdPlayer"),
            description: localized(e, "TypeLocalized"),
            match_minute: str_field(e, "MatchMinute"),
        }
    }

    pub fn is_goal(&self) -> bool {
        matches!(
            self.description.trim().to_lowercase().as_str(),
            "goal" | "goal!"
        )
    }

    pub fn is_attacking(&self) -> bool {
        self.description == ATTEMPT_AT_GOAL || self.description == GOAL
    }
}

/// A squad member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub team_id: String,
    pub player_id: String,
    pub player_name: String,
}

impl Player {
    pub fn from_json(p: &Value) -> Self {
        Self {
            team_id: str_field(p, "IdTeam"),
            player_id: str_field(p, "IdPlayer"),
            player_name: localized(p, "ShortName"),
        }
    }
}

/// Parse the `Event` list of a timeline response
pub fn parse_events(data: &Value) -> Vec<MatchEvent> {
    array_field(data, "Event").iter().map(MatchEvent::from_json).collect()
}

/// Parse the `Players` list of a squad response
pub fn parse_squad(data: &Value) -> Vec<Player> {
    array_field(data, "Players").iter().map(Player::from_json).collect()
}
