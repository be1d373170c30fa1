use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::json::{array_field, first_str_field, localized, str_field};

/// One fixture of the tournament calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub match_id: String,
    pub stage_name: String,
    pub group_name: String,
    pub home_id: String,
    pub home_name: String,
    pub away_id: String,
    pub away_name: String,
    pub kickoff: Option<NaiveDateTime>,
    /// `%Y-%m-%d`, or empty when the kickoff is unknown
    pub kickoff_date: String,
}

impl Match {
    pub fn from_json(m: &Value) -> Self {
        let null = Value::Null;
        let home = m.get("Home").filter(|h| !h.is_null()).unwrap_or(&null);
        let away = m.get("Away").filter(|a| !a.is_null()).unwrap_or(&null);

        let kickoff = parse_kickoff(&str_field(m, "LocalDate"));
        let kickoff_date = kickoff
            .map(|ts| ts.format("%Y-%m-%d").to_string())
            .unwrap_or_default();

        Self {
            match_id: str_field(m, "IdMatch"),
            stage_name: localized(m, "StageName"),
            group_name: localized(m, "GroupName"),
            home_id: str_field(home, "IdTeam"),
            home_name: first_str_field(home, &["ShortClubName", "TeamName"]),
            away_id: str_field(away, "IdTeam"),
            away_name: first_str_field(away, &["ShortClubName", "TeamName"]),
            kickoff,
            kickoff_date,
        }
    }

    pub fn match_name(&self) -> String {
        format!("{} vs {}", self.home_name, self.away_name)
    }

    /// Team name for a team id taking part in this match
    pub fn team_name(&self, team_id: &str) -> Option<&str> {
        if team_id == self.home_id {
            Some(&self.home_name)
        } else if team_id == self.away_id {
            Some(&self.away_name)
        } else {
            None
        }
    }

    /// Label shown in the match selector
    pub fn select_label(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.stage_name,
            self.group_name,
            self.match_name(),
            self.kickoff_date
        )
    }
}

/// Parse the `Results` of a calendar response
pub fn parse_matches(data: &Value) -> Vec<Match> {
    array_field(data, "Results").iter().map(Match::from_json).collect()
}

/// Parse a kickoff timestamp; unknown formats yield `None`
pub fn parse_kickoff(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
