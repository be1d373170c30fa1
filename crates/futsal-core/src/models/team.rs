use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::json::{array_field, first_str_field, str_field};
use crate::api::flag_endpoint;

/// A team registered for the season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: String,
    pub team_name: String,
    /// FIFA country code, e.g. `ARG`
    pub abbreviation: String,
    pub confederation: String,
}

impl Team {
    pub fn from_json(t: &Value) -> Self {
        Self {
            team_id: str_field(t, "IdTeam"),
            team_name: first_str_field(t, &["ShortClubName", "TeamName"]),
            abbreviation: str_field(t, "Abbreviation"),
            confederation: str_field(t, "IdConfederation"),
        }
    }

    /// API path of the team's flag, if it has a country code
    pub fn flag_path(&self) -> Option<String> {
        if self.abbreviation.is_empty() {
            None
        } else {
            Some(flag_endpoint(&self.abbreviation))
        }
    }
}

/// Parse the `Results` of a season teams response
pub fn parse_teams(data: &Value) -> Vec<Team> {
    array_field(data, "Results").iter().map(Team::from_json).collect()
}

/// TeamId -> country code, skipping teams without one
pub fn abbreviations_by_team_id(teams: &[Team]) -> HashMap<String, String> {
    teams
        .iter()
        .filter(|t| !t.abbreviation.is_empty())
        .map(|t| (t.team_id.clone(), t.abbreviation.clone()))
        .collect()
}

/// Raw flag image as served by the API
#[derive(Debug, Clone, PartialEq)]
pub struct FlagImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A flag fetched for rendering. `image` is `None` when the fetch failed;
/// pages then render without the flag.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagAsset {
    pub country_code: String,
    pub image: Option<FlagImage>,
}

impl FlagAsset {
    pub fn is_available(&self) -> bool {
        self.image.is_some()
    }
}
