//! SVG charts for the infographic and statistics pages.
//!
//! Home is drawn above the axis and away below it wherever a chart is
//! mirrored. Team colours come from the match palette.

use std::collections::HashMap;

use futsal_core::colors::MatchPalette;
use futsal_core::models::Match;
use futsal_core::stats::{
    cumulative_participation, AttackAction, EventStats, MinuteWeights, PlayerParticipation,
    SmoothedCurves, HALFTIME_MINUTE, MATCH_MINUTES, WHITELIST_EVENTS,
};
use futsal_core::utils::truncate_string;

use super::svg::{format_number, nice_ticks, Anchor, Canvas, Frame, Stroke};

const WIDTH: f64 = 560.0;
const HEIGHT: f64 = 320.0;

const UNKNOWN_TEAM_COLOR: &str = "#888888";
const ZERO_LINE: &str = "#000000";
const HALFTIME_LINE: &str = "#808080";
const NET_LINE: &str = "#808080";

/// Widest player name drawn next to a bar
const MAX_PLAYER_LABEL: usize = 18;

/// Vertical gap between stacked goal labels, in pixels
const GOAL_LABEL_STEP: f64 = 9.0;

fn minute_ticks() -> Vec<f64> {
    (0..=MATCH_MINUTES).step_by(5).map(f64::from).collect()
}

fn team_color<'a>(palette: &'a MatchPalette, m: &Match, team_name: &str) -> &'a str {
    if team_name == m.home_name {
        &palette.home_color
    } else if team_name == m.away_name {
        &palette.away_color
    } else {
        UNKNOWN_TEAM_COLOR
    }
}

fn team_legend<'a>(m: &'a Match, palette: &'a MatchPalette) -> [(&'a str, &'a str); 2] {
    [
        (m.home_name.as_str(), palette.home_color.as_str()),
        (m.away_name.as_str(), palette.away_color.as_str()),
    ]
}

fn empty_message(canvas: &mut Canvas, text: &str) {
    let f = *canvas.frame();
    canvas.text(
        (f.plot_left() + f.plot_right()) / 2.0,
        (f.plot_top() + f.plot_bottom()) / 2.0,
        text,
        Anchor::Middle,
        11.0,
    );
}

/// Mirror bars of attacking weight per minute with goal labels at the tips
pub fn momentum_chart(
    matrix: &[MinuteWeights],
    goals: &[AttackAction],
    m: &Match,
    palette: &MatchPalette,
) -> String {
    let peak = matrix
        .iter()
        .map(|r| r.home.max(r.away))
        .fold(1.0, f64::max);
    let limit = peak * 1.35;
    let frame = Frame::new(WIDTH, HEIGHT)
        .x_range(-0.5, f64::from(MATCH_MINUTES) + 0.5)
        .y_range(-limit, limit);
    let mut canvas = Canvas::new(frame, "Attacking momentum per minute");
    canvas.y_axis(&nice_ticks(-peak, peak, 4), "Weight per minute");

    for row in matrix {
        let x = f64::from(row.minute);
        if row.home > 0.0 {
            canvas.rect(frame.x(x - 0.4), frame.y(row.home), frame.x(x + 0.4), frame.y(0.0), &palette.home_color);
        }
        if row.away > 0.0 {
            canvas.rect(frame.x(x - 0.4), frame.y(0.0), frame.x(x + 0.4), frame.y(-row.away), &palette.away_color);
        }
    }
    canvas.hline(0.0, Stroke::solid(ZERO_LINE, 1.0));
    canvas.vline(f64::from(HALFTIME_MINUTE), Stroke::dashed(HALFTIME_LINE, 1.0));

    let weights: HashMap<i64, &MinuteWeights> = matrix.iter().map(|r| (i64::from(r.minute), r)).collect();
    for (team_id, home_side) in [(&m.home_id, true), (&m.away_id, false)] {
        let mut team_goals: Vec<&AttackAction> = goals.iter().filter(|g| &g.team_id == team_id).collect();
        team_goals.sort_by(|a, b| a.sec.total_cmp(&b.sec));

        let mut stacked: HashMap<i64, usize> = HashMap::new();
        for goal in team_goals {
            let Some(row) = weights.get(&goal.minute) else {
                continue;
            };
            let k = stacked.entry(goal.minute).or_insert(0);
            let offset = *k as f64 * GOAL_LABEL_STEP;
            *k += 1;

            let x = frame.x(goal.minute as f64);
            let label = format!("{} (G)", goal.label);
            if home_side {
                let tip = frame.y(row.home + 0.05 * limit);
                canvas.text(x, tip - offset, &label, Anchor::Middle, 8.0);
            } else {
                let tip = frame.y(-row.away - 0.05 * limit);
                canvas.text(x, tip + 8.0 + offset, &label, Anchor::Middle, 8.0);
            }
        }
    }

    canvas.x_axis(&minute_ticks(), "Minute");
    canvas.legend(&team_legend(m, palette));
    canvas.finish()
}

fn by_minute(ys: &[f64]) -> Vec<(f64, f64)> {
    ys.iter().enumerate().map(|(i, &y)| (i as f64, y)).collect()
}

/// EWMA-smoothed attack curves plus the net curve
pub fn smoothed_chart(curves: &SmoothedCurves, m: &Match, palette: &MatchPalette) -> String {
    let values = curves.home.iter().chain(&curves.away).chain(&curves.net);
    let (lo, hi) = values.fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let (lo, hi) = if hi - lo < 1e-9 { (-1.0, 1.0) } else { (lo, hi) };
    let pad = (hi - lo) * 0.1;

    let frame = Frame::new(WIDTH, HEIGHT)
        .x_range(0.0, f64::from(MATCH_MINUTES))
        .y_range(lo - pad, hi + pad);
    let mut canvas = Canvas::new(frame, "Smoothed attacking intensity");
    canvas.y_axis(&nice_ticks(lo, hi, 4), "EWMA");
    canvas.hline(0.0, Stroke::solid(ZERO_LINE, 1.0));
    canvas.vline(f64::from(HALFTIME_MINUTE), Stroke::dashed(HALFTIME_LINE, 1.0));

    canvas.polyline(&by_minute(&curves.home), Stroke::solid(&palette.home_color, 2.0));
    canvas.polyline(&by_minute(&curves.away), Stroke::solid(&palette.away_color, 2.0));
    canvas.polyline(&by_minute(&curves.net), Stroke::dashed(NET_LINE, 1.0));

    canvas.x_axis(&minute_ticks(), "Minute");
    let [home, away] = team_legend(m, palette);
    canvas.legend(&[home, away, ("Net", NET_LINE)]);
    canvas.finish()
}

/// Horizontal bars of the most involved attackers
pub fn top_players_chart(players: &[PlayerParticipation], m: &Match, palette: &MatchPalette) -> String {
    let rows = players.len().max(1) as f64;
    let best = players.iter().map(|p| p.score).fold(1.0, f64::max);
    let frame = Frame::new(WIDTH, HEIGHT)
        .margins(130.0, 24.0, 30.0, 36.0)
        .x_range(0.0, best * 1.15)
        .y_range(0.0, rows);
    let mut canvas = Canvas::new(frame, "Top players by attacking participation");

    if players.is_empty() {
        empty_message(&mut canvas, "No attacking actions for this match");
        return canvas.finish();
    }

    for (i, player) in players.iter().enumerate() {
        let band = rows - i as f64;
        let (top, bottom) = (frame.y(band - 0.15), frame.y(band - 0.85));
        let color = team_color(palette, m, &player.team_name);
        canvas.rect(frame.x(0.0), top, frame.x(player.score), bottom, color);

        let middle = (top + bottom) / 2.0 + 3.0;
        let name = if player.player_name.is_empty() {
            "(unknown)".to_string()
        } else {
            truncate_string(&player.player_name, MAX_PLAYER_LABEL)
        };
        canvas.text(frame.plot_left() - 6.0, middle, &name, Anchor::End, 9.0);
        canvas.text(frame.x(player.score) + 4.0, middle, &format_number(player.score), Anchor::Start, 9.0);
    }

    canvas.x_axis(&nice_ticks(0.0, best, 5), "Attacking participation (attempts + 2x goals)");
    canvas.legend(&team_legend(m, palette));
    canvas.finish()
}

/// Step points starting at the origin and running to `end`
fn step_points(steps: &[(f64, f64)], end: f64) -> Vec<(f64, f64)> {
    let mut points = vec![(0.0, 0.0)];
    let mut level = 0.0;
    for &(x, total) in steps {
        points.push((x, level));
        points.push((x, total));
        level = total;
    }
    points.push((end.max(points[points.len() - 1].0), level));
    points
}

/// Cumulative participation over time, one step line per team
pub fn cumulative_chart(actions: &[AttackAction], m: &Match, palette: &MatchPalette) -> String {
    let home = cumulative_participation(actions, &m.home_id);
    let away = cumulative_participation(actions, &m.away_id);

    let last_minute = home
        .iter()
        .chain(&away)
        .map(|(x, _)| *x)
        .fold(f64::from(MATCH_MINUTES), f64::max);
    let top = home
        .iter()
        .chain(&away)
        .map(|(_, y)| *y)
        .fold(1.0, f64::max);

    let frame = Frame::new(WIDTH, HEIGHT)
        .x_range(0.0, last_minute)
        .y_range(0.0, top * 1.1);
    let mut canvas = Canvas::new(frame, "Cumulative attacking participation");
    canvas.y_axis(&nice_ticks(0.0, top, 5), "Cumulative participation");
    canvas.polyline(&step_points(&home, last_minute), Stroke::solid(&palette.home_color, 2.0));
    canvas.polyline(&step_points(&away, last_minute), Stroke::solid(&palette.away_color, 2.0));
    canvas.x_axis(&nice_ticks(0.0, last_minute, 8), "Minute");
    canvas.legend(&team_legend(m, palette));
    canvas.finish()
}

fn side_color(palette: &MatchPalette, index: usize) -> &str {
    if index == 0 {
        &palette.home_color
    } else {
        &palette.away_color
    }
}

/// Total events per team, home then away
pub fn event_counts_chart(stats: &EventStats, palette: &MatchPalette) -> String {
    let teams = stats.counts.len().max(1) as f64;
    let peak = stats.counts.iter().map(|c| c.total as f64).fold(1.0, f64::max);
    let frame = Frame::new(WIDTH, HEIGHT)
        .x_range(-0.5, teams - 0.5)
        .y_range(0.0, peak * 1.15);
    let mut canvas = Canvas::new(frame, "Count of events by team");
    canvas.y_axis(&nice_ticks(0.0, peak, 5), "Events");

    for (i, count) in stats.counts.iter().enumerate() {
        let x = i as f64;
        let total = count.total as f64;
        canvas.rect(frame.x(x - 0.3), frame.y(total), frame.x(x + 0.3), frame.y(0.0), side_color(palette, i));
        canvas.text(frame.x(x), frame.y(total) - 4.0, &count.total.to_string(), Anchor::Middle, 9.0);
        canvas.text(frame.x(x), frame.plot_bottom() + 14.0, &count.team_name, Anchor::Middle, 10.0);
    }
    canvas.hline(0.0, Stroke::solid(ZERO_LINE, 1.0));
    canvas.finish()
}

/// Grouped bars of the whitelisted event types per team
pub fn distribution_chart(stats: &EventStats, palette: &MatchPalette) -> String {
    let categories = WHITELIST_EVENTS.len() as f64;
    let peak = stats
        .distribution
        .iter()
        .flat_map(|d| d.counts.iter())
        .map(|c| *c as f64)
        .fold(1.0, f64::max);
    let frame = Frame::new(WIDTH, HEIGHT)
        .x_range(-0.5, categories - 0.5)
        .y_range(0.0, peak * 1.15);
    let mut canvas = Canvas::new(frame, "Event distribution by team");
    canvas.y_axis(&nice_ticks(0.0, peak, 5), "Events");

    let width = 0.8 / stats.distribution.len().max(1) as f64;
    for (team_index, team) in stats.distribution.iter().enumerate() {
        let color = side_color(palette, team_index);
        for (category, count) in team.counts.iter().enumerate() {
            let left = category as f64 - 0.4 + team_index as f64 * width;
            let value = *count as f64;
            canvas.rect(frame.x(left), frame.y(value), frame.x(left + width * 0.95), frame.y(0.0), color);
        }
    }
    for (category, name) in WHITELIST_EVENTS.iter().enumerate() {
        canvas.text(frame.x(category as f64), frame.plot_bottom() + 14.0, name, Anchor::Middle, 10.0);
    }
    canvas.hline(0.0, Stroke::solid(ZERO_LINE, 1.0));

    let legend: Vec<(&str, &str)> = stats
        .distribution
        .iter()
        .enumerate()
        .map(|(i, d)| (d.team_name.as_str(), side_color(palette, i)))
        .collect();
    canvas.legend(&legend);
    canvas.finish()
}
