use std::collections::HashMap;

use serde::Serialize;

use super::metrics::parse_time_to_seconds;
use crate::models::{Match, MatchEvent, Player};

/// One attacking action as shown in the timeline table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineRow {
    pub team_id: String,
    pub team_name: String,
    pub description: String,
    pub match_minute: String,
    pub player_name: String,
}

/// Attempts and goals of a match in chronological order, with team and
/// player names filled in ("" when unknown).
pub fn process_timeline(events: &[MatchEvent], m: &Match, squads: &[Player]) -> Vec<TimelineRow> {
    let mut names: HashMap<&str, &str> = HashMap::new();
    for p in squads {
        names.entry(p.player_id.as_str()).or_insert(p.player_name.as_str());
    }

    let mut rows: Vec<(f64, TimelineRow)> = events
        .iter()
        .filter(|e| e.is_attacking())
        .map(|e| {
            let row = TimelineRow {
                team_id: e.team_id.clone(),
                team_name: m.team_name(&e.team_id).unwrap_or_default().to_string(),
                description: e.description.clone(),
                match_minute: e.match_minute.clone(),
                player_name: names.get(e.player_id.as_str()).copied().unwrap_or_default().to_string(),
            };
            (parse_time_to_seconds(&e.match_minute), row)
        })
        .collect();

    rows.sort_by(|a, b| a.0.total_cmp(&b.0));
    rows.into_iter().map(|(_, row)| row).collect()
}

/// Final score `(home, away)` counted from goal events
pub fn score(events: &[MatchEvent], m: &Match) -> (usize, usize) {
    events
        .iter()
        .filter(|e| e.is_goal())
        .fold((0, 0), |(home, away), e| {
            if e.team_id == m.home_id {
                (home + 1, away)
            } else if e.team_id == m.away_id {
                (home, away + 1)
            } else {
                (home, away)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_match() -> Match {
        Match {
            match_id: "1".into(),
            stage_name: String::new(),
            group_name: String::new(),
            home_id: "H".into(),
            home_name: "Brazil".into(),
            away_id: "A".into(),
            away_name: "Iran".into(),
            kickoff: None,
            kickoff_date: String::new(),
        }
    }

    fn event(team: &str, player: &str, desc: &str, minute: &str) -> MatchEvent {
        MatchEvent {
            team_id: team.into(),
            player_id: player.into(),
            description: desc.into(),
            match_minute: minute.into(),
        }
    }

    #[test]
    fn test_timeline_filters_and_sorts() {
        let events = vec![
            event("H", "7", "Goal!", "10'"),
            event("A", "9", "Foul", "3'"),
            event("A", "9", "Attempt at Goal", "2'"),
            event("X", "", "Attempt at Goal", "35'"),
        ];
        let squads = vec![
            Player { team_id: "H".into(), player_id: "7".into(), player_name: "DYEGO".into() },
            Player { team_id: "H".into(), player_id: "7".into(), player_name: "DUPLICATE".into() },
        ];
        let rows = process_timeline(&events, &sample_match(), &squads);
        assert_eq!(rows.len(), 3);
        // Numeric order, not string order ("10'" after "2'")
        assert_eq!(rows[0].match_minute, "2'");
        assert_eq!(rows[0].team_name, "Iran");
        assert_eq!(rows[0].player_name, "");
        assert_eq!(rows[1].player_name, "DYEGO");
        assert_eq!(rows[2].team_name, "");
    }

    #[test]
    fn test_score() {
        let events = vec![
            event("H", "", "Goal!", "1'"),
            event("H", "", "Goal!", "5'"),
            event("A", "", "Goal!", "8'"),
            event("A", "", "Attempt at Goal", "9'"),
        ];
        assert_eq!(score(&events, &sample_match()), (2, 1));
        assert_eq!(score(&[], &sample_match()), (0, 0));
    }
}
