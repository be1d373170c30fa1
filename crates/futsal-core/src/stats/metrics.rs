//! Attack metrics for the infographic.
//!
//! Times from the API arrive in many textual shapes; `parse_time_to_seconds`
//! normalizes them. Attacking actions are weighted (goal = 2, attempt = 1)
//! and aggregated per minute, per player and cumulatively.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::models::{Match, MatchEvent, Player};

// --- Constants ---

/// Futsal halftime, in minutes
pub const HALFTIME_MINUTE: u32 = 20;

/// Last minute of the per-minute matrix (two 20-minute halves)
pub const MATCH_MINUTES: u32 = 40;

/// EWMA time constant, in minutes
pub const SMOOTH_TAU_MIN: f64 = 3.0;

pub const ATTEMPT_WEIGHT: f64 = 1.0;
pub const GOAL_WEIGHT: f64 = 2.0;

/// Players shown in the participation ranking
pub const TOP_N_PLAYERS: usize = 8;

// ---------- Time parsing ----------

/// Digits of `s` concatenated, parsed as a number (0 when none)
fn digits_value(s: &str) -> u64 {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Leading ASCII digits of `s`
fn leading_digits(s: &str) -> &str {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    &s[..end]
}

/// Number between `open` and `close`, e.g. `M34S` -> 34
fn number_between(s: &str, open: char, close: char) -> Option<u64> {
    s.match_indices(open).find_map(|(i, _)| {
        let rest = &s[i + open.len_utf8()..];
        let digits = leading_digits(rest);
        if !digits.is_empty() && rest[digits.len()..].starts_with(close) {
            digits.parse().ok()
        } else {
            None
        }
    })
}

/// Match time in seconds.
///
/// Accepts `12`, `"12"` (minutes), `"12:34"`, `"12'34"`, `"29\""`,
/// `"PT12M34S"`, `"PT34S"`, curly quotes and noisy variants. Anything
/// unparseable is 0.
pub fn parse_time_to_seconds(raw: &str) -> f64 {
    let s = raw
        .trim()
        .replace(['\u{2019}', '\u{2032}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"");
    if s.is_empty() {
        return 0.0;
    }

    // ISO-like duration
    if s.starts_with("PT") && s.ends_with('S') {
        let rest = &s[2..];
        let lead = leading_digits(rest);
        if lead.is_empty() {
            return 0.0;
        }
        let minutes: u64 = lead.parse().unwrap_or(0);
        return match rest[lead.len()..].chars().next() {
            Some('M') => {
                let seconds = number_between(&s, 'M', 'S').unwrap_or(0);
                (minutes * 60 + seconds) as f64
            }
            // PT34S: seconds only
            Some('S') => minutes as f64,
            _ => 0.0,
        };
    }

    // mm:ss or mm'ss
    if s.contains(':') || s.contains('\'') {
        let (m, sec) = match s.find([':', '\'']) {
            Some(i) => (&s[..i], &s[i + 1..]),
            None => (s.as_str(), ""),
        };
        return (digits_value(m) * 60 + digits_value(sec)) as f64;
    }

    // Seconds only
    if s.contains('"') || s.to_lowercase().contains("sec") {
        return digits_value(&s) as f64;
    }

    // Bare integers are minutes
    if s.chars().all(|c| c.is_ascii_digit()) {
        return (digits_value(&s) * 60) as f64;
    }

    let numbers: Vec<u64> = s
        .split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse().unwrap_or(0))
        .collect();
    match numbers.as_slice() {
        [m, sec, ..] => (m * 60 + sec) as f64,
        [m] => (m * 60) as f64,
        [] => 0.0,
    }
}

/// Causal exponentially weighted moving average with step `dt_minutes`
/// and time constant `tau_minutes`.
pub fn ewma(x: &[f64], dt_minutes: f64, tau_minutes: f64) -> Vec<f64> {
    let Some(&first) = x.first() else {
        return Vec::new();
    };
    let alpha = 1.0 - (-dt_minutes / tau_minutes.max(1e-9)).exp();
    let mut y = Vec::with_capacity(x.len());
    y.push(first);
    for &value in &x[1..] {
        let prev = y[y.len() - 1];
        y.push(alpha * value + (1.0 - alpha) * prev);
    }
    y
}

// ---------- Attack actions ----------

/// An attempt or goal with its timing and weight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttackAction {
    pub team_id: String,
    pub team_name: String,
    pub player_name: String,
    pub description: String,
    pub sec: f64,
    /// Nearest whole minute (ties to even)
    pub minute: i64,
    /// Elapsed minutes as `mm'`
    pub label: String,
    pub weight: f64,
    pub is_goal: bool,
}

/// Attempts and goals of a match, with team and player names resolved
pub fn build_attack_actions(events: &[MatchEvent], m: &Match, squads: &[Player]) -> Vec<AttackAction> {
    let mut names: HashMap<&str, &str> = HashMap::new();
    for p in squads {
        names.entry(p.player_id.as_str()).or_insert(p.player_name.as_str());
    }

    events
        .iter()
        .filter(|e| e.is_attacking())
        .map(|e| {
            let sec = parse_time_to_seconds(&e.match_minute);
            let is_goal = e.is_goal();
            AttackAction {
                team_id: e.team_id.clone(),
                team_name: m.team_name(&e.team_id).unwrap_or_default().to_string(),
                player_name: names.get(e.player_id.as_str()).copied().unwrap_or_default().to_string(),
                description: e.description.clone(),
                sec,
                minute: (sec / 60.0).round_ties_even() as i64,
                label: format!("{:02}'", (sec / 60.0).floor() as i64),
                weight: if is_goal { GOAL_WEIGHT } else { ATTEMPT_WEIGHT },
                is_goal,
            }
        })
        .collect()
}

/// Summed weights of both teams in one minute
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MinuteWeights {
    pub minute: u32,
    pub home: f64,
    pub away: f64,
}

/// Per-minute weight matrix for minutes 0..=40; actions outside are dropped
pub fn build_minute_matrix(actions: &[AttackAction], m: &Match) -> Vec<MinuteWeights> {
    let mut rows: Vec<MinuteWeights> = (0..=MATCH_MINUTES)
        .map(|minute| MinuteWeights { minute, home: 0.0, away: 0.0 })
        .collect();

    for a in actions {
        if a.minute < 0 || a.minute > MATCH_MINUTES as i64 {
            continue;
        }
        let row = &mut rows[a.minute as usize];
        if a.team_id == m.home_id {
            row.home += a.weight;
        } else if a.team_id == m.away_id {
            row.away += a.weight;
        }
    }
    rows
}

/// Smoothed attack curves: home positive, away negative, and the net
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmoothedCurves {
    pub home: Vec<f64>,
    pub away: Vec<f64>,
    pub net: Vec<f64>,
}

pub fn smoothed_curves(matrix: &[MinuteWeights], tau_minutes: f64) -> SmoothedCurves {
    let home: Vec<f64> = matrix.iter().map(|r| r.home).collect();
    let away: Vec<f64> = matrix.iter().map(|r| -r.away).collect();
    let diff: Vec<f64> = matrix.iter().map(|r| r.home - r.away).collect();
    SmoothedCurves {
        home: ewma(&home, 1.0, tau_minutes),
        away: ewma(&away, 1.0, tau_minutes),
        net: ewma(&diff, 1.0, tau_minutes),
    }
}

pub fn goals_only(actions: &[AttackAction]) -> Vec<AttackAction> {
    actions.iter().filter(|a| a.is_goal).cloned().collect()
}

/// Attacking participation of one player (attempts + 2 x goals)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerParticipation {
    pub player_name: String,
    pub team_name: String,
    pub score: f64,
}

/// Highest participation first; ties keep name order
pub fn top_players(actions: &[AttackAction], top_n: usize) -> Vec<PlayerParticipation> {
    let mut totals: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    for a in actions {
        *totals
            .entry((a.player_name.as_str(), a.team_name.as_str()))
            .or_insert(0.0) += a.weight;
    }

    let mut ranked: Vec<PlayerParticipation> = totals
        .into_iter()
        .map(|((player, team), score)| PlayerParticipation {
            player_name: player.to_string(),
            team_name: team.to_string(),
            score,
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(top_n);
    ranked
}

/// Cumulative participation steps `(minute, total)` for one team
pub fn cumulative_participation(actions: &[AttackAction], team_id: &str) -> Vec<(f64, f64)> {
    let mut team: Vec<&AttackAction> = actions.iter().filter(|a| a.team_id == team_id).collect();
    team.sort_by(|a, b| a.sec.total_cmp(&b.sec));
    let mut total = 0.0;
    team.into_iter()
        .map(|a| {
            total += a.weight;
            (a.sec / 60.0, total)
        })
        .collect()
}
