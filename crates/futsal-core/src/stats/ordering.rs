//! Ordering of matches in the selector.
//!
//! Group-stage matches come first (by group letter), then knockout rounds
//! in tournament order; dated matches precede undated ones, then kickoff
//! time and match name break ties.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::Match;

/// Rank for names without a recognizable group letter
const NO_GROUP_RANK: u32 = 99;

/// Letter of a `Group X` mention (case-insensitive), if present
fn group_letter(name: &str) -> Option<char> {
    let lower = name.to_lowercase();
    let mut search_from = 0;
    while let Some(pos) = lower[search_from..].find("group") {
        let after = &lower[search_from + pos + "group".len()..];
        let trimmed = after.trim_start();
        if trimmed.len() < after.len() {
            if let Some(c) = trimmed.chars().next().filter(char::is_ascii_alphabetic) {
                return Some(c.to_ascii_uppercase());
            }
        }
        search_from += pos + "group".len();
    }
    None
}

/// 1 for Group A through 26 for Group Z, 99 otherwise
pub fn group_rank(name: &str) -> u32 {
    group_letter(name)
        .map(|c| c as u32 - 'A' as u32 + 1)
        .unwrap_or(NO_GROUP_RANK)
}

pub fn is_group_stage(group_name: &str) -> bool {
    group_letter(group_name).is_some()
}

/// Tournament order of a knockout stage name
pub fn stage_order(stage: &str) -> u32 {
    let s = stage.to_lowercase();
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.contains("roundof16") || s.contains("sixteen") {
        200
    } else if s.contains("quarterfinal") || s.contains("quarter-final") {
        300
    } else if s.contains("semifinal") || s.contains("semi-final") {
        400
    } else if s.contains("third") || s.contains("3rd") {
        500
    } else if s.contains("final") {
        600
    } else {
        700
    }
}

fn compare_for_select(a: &Match, b: &Match) -> Ordering {
    is_group_stage(&b.group_name)
        .cmp(&is_group_stage(&a.group_name))
        .then_with(|| group_rank(&a.group_name).cmp(&group_rank(&b.group_name)))
        .then_with(|| stage_order(&a.stage_name).cmp(&stage_order(&b.stage_name)))
        .then_with(|| b.kickoff.is_some().cmp(&a.kickoff.is_some()))
        .then_with(|| a.kickoff.cmp(&b.kickoff))
        .then_with(|| a.match_name().cmp(&b.match_name()))
}

/// Matches in selector order (stable)
pub fn sort_matches_for_select(matches: &[Match]) -> Vec<Match> {
    let mut sorted = matches.to_vec();
    sorted.sort_by(compare_for_select);
    sorted
}

/// Make labels unique by appending ` (2)`, ` (3)`, ... to repeats
pub fn unique_labels<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for label in labels {
        let label = label.into();
        let unique = if seen.contains(&label) {
            let mut c = 2;
            let mut candidate = format!("{} ({})", label, c);
            while seen.contains(&candidate) {
                c += 1;
                candidate = format!("{} ({})", label, c);
            }
            candidate
        } else {
            label
        };
        seen.insert(unique.clone());
        out.push(unique);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_kickoff;

    fn m(id: &str, stage: &str, group: &str, date: &str, home: &str) -> Match {
        Match {
            match_id: id.into(),
            stage_name: stage.into(),
            group_name: group.into(),
            home_id: "1".into(),
            home_name: home.into(),
            away_id: "2".into(),
            away_name: "Away".into(),
            kickoff: parse_kickoff(date),
            kickoff_date: date.chars().take(10).collect(),
        }
    }

    #[test]
    fn test_group_rank() {
        assert_eq!(group_rank("Group A"), 1);
        assert_eq!(group_rank("group  f"), 6);
        assert_eq!(group_rank("Final"), 99);
        assert_eq!(group_rank("GroupA"), 99);
        assert_eq!(group_rank(""), 99);
    }

    #[test]
    fn test_stage_order() {
        assert_eq!(stage_order("Round of 16"), 200);
        assert_eq!(stage_order("Quarter-final"), 300);
        assert_eq!(stage_order("Semi-final"), 400);
        assert_eq!(stage_order("Play-off for third place"), 500);
        assert_eq!(stage_order("Final"), 600);
        assert_eq!(stage_order("First Stage"), 700);
    }

    #[test]
    fn test_sort_groups_first_then_knockouts() {
        let matches = vec![
            m("final", "Final", "", "2024-10-06T18:00:00", "F"),
            m("b1", "First Stage", "Group B", "2024-09-15T18:00:00", "B"),
            m("qf", "Quarter-final", "", "2024-09-30T18:00:00", "Q"),
            m("a2", "First Stage", "Group A", "2024-09-18T18:00:00", "A2"),
            m("a1", "First Stage", "Group A", "2024-09-14T18:00:00", "A1"),
            m("r16", "Round of 16", "", "2024-09-25T18:00:00", "R"),
        ];
        let ids: Vec<String> = sort_matches_for_select(&matches)
            .into_iter()
            .map(|m| m.match_id)
            .collect();
        assert_eq!(ids, vec!["a1", "a2", "b1", "r16", "qf", "final"]);
    }

    #[test]
    fn test_sort_dated_before_undated() {
        let matches = vec![
            m("undated", "Semi-final", "", "", "A"),
            m("dated", "Semi-final", "", "2024-10-03T18:00:00", "Z"),
        ];
        let sorted = sort_matches_for_select(&matches);
        assert_eq!(sorted[0].match_id, "dated");
    }

    #[test]
    fn test_unique_labels() {
        let labels = unique_labels(["a", "b", "a", "a", "a (2)"]);
        assert_eq!(labels, vec!["a", "b", "a (2)", "a (3)", "a (2) (2)"]);
    }
}
