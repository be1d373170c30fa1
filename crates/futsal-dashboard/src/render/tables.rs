use std::collections::HashMap;

use futsal_core::models::{FlagAsset, Match};
use futsal_core::stats::{sort_matches_for_select, unique_labels, EventStats, TimelineRow, WHITELIST_EVENTS};

use super::{escape, layout};

/// One entry of the match selector
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOption {
    pub label: String,
    pub match_id: String,
}

/// Selector entries in display order with unique labels
pub fn match_options(matches: &[Match]) -> Vec<MatchOption> {
    let sorted = sort_matches_for_select(matches);
    let labels = unique_labels(sorted.iter().map(Match::select_label));
    labels
        .into_iter()
        .zip(sorted)
        .map(|(label, m)| MatchOption {
            label,
            match_id: m.match_id,
        })
        .collect()
}

pub fn match_selector(options: &[MatchOption], selected: Option<&str>) -> String {
    let mut html = String::from(
        "<form method=\"get\" action=\"/\">\n<label for=\"match\">Choose a match to view its timeline:</label>\n\
         <select id=\"match\" name=\"match\" onchange=\"this.form.submit()\">\n",
    );
    let placeholder = if selected.is_none() { " selected" } else { "" };
    html.push_str(&format!("<option value=\"\" disabled{}>Select a match...</option>\n", placeholder));
    for option in options {
        let mark = if Some(option.match_id.as_str()) == selected { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            escape(&option.match_id),
            mark,
            escape(&option.label)
        ));
    }
    html.push_str("</select>\n<button type=\"submit\">Show</button>\n</form>");
    html
}

/// Stage, group, match and date; the score when known
pub fn match_caption(m: &Match, score: Option<(usize, usize)>) -> String {
    let mut parts = vec![
        format!("<strong>Stage:</strong> {}", escape(&m.stage_name)),
        format!("<strong>Group:</strong> {}", escape(&m.group_name)),
        format!("<strong>Match:</strong> {}", escape(&m.match_name())),
        format!("<strong>Date:</strong> {}", escape(&m.kickoff_date)),
    ];
    if let Some((home, away)) = score {
        parts.push(format!(
            "<strong>Score:</strong> {} ({}) - {} ({})",
            escape(&m.home_name),
            home,
            escape(&m.away_name),
            away
        ));
    }
    format!("<p class=\"caption\">{}</p>", parts.join(" &nbsp;|&nbsp; "))
}

/// Flag image tag, or nothing when the flag is unavailable
pub fn flag_img(asset: Option<&FlagAsset>) -> String {
    match asset {
        Some(flag) if flag.is_available() => format!(
            "<img class=\"flag\" src=\"/flags/{code}\" alt=\"{code}\">",
            code = escape(&flag.country_code)
        ),
        _ => String::new(),
    }
}

pub fn timeline_table(rows: &[TimelineRow], flags: &HashMap<String, FlagAsset>) -> String {
    if rows.is_empty() {
        return layout::notice("No attacking actions found for this match.");
    }
    let mut html = String::from(
        "<table class=\"timeline\">\n<thead><tr><th></th><th>Team</th><th>Description</th>\
         <th>Minute</th><th>Player</th></tr></thead>\n<tbody>\n",
    );
    for row in rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            flag_img(flags.get(&row.team_id)),
            escape(&row.team_name),
            escape(&row.description),
            escape(&row.match_minute),
            escape(&row.player_name)
        ));
    }
    html.push_str("</tbody>\n</table>");
    html
}

pub fn event_counts_table(stats: &EventStats, flags: &HashMap<String, FlagAsset>) -> String {
    let mut html = String::from(
        "<table class=\"counts\">\n<thead><tr><th></th><th>Team</th><th>Events</th></tr></thead>\n<tbody>\n",
    );
    for count in &stats.counts {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"num\">{}</td></tr>\n",
            flag_img(flags.get(&count.team_id)),
            escape(&count.team_name),
            count.total
        ));
    }
    html.push_str("</tbody>\n</table>");
    html
}

pub fn event_distribution_table(stats: &EventStats, flags: &HashMap<String, FlagAsset>) -> String {
    let headers: String = WHITELIST_EVENTS
        .iter()
        .map(|e| format!("<th>{}</th>", escape(e)))
        .collect();
    let mut html = format!(
        "<table class=\"distribution\">\n<thead><tr><th></th><th>Team</th>{}</tr></thead>\n<tbody>\n",
        headers
    );
    for team in &stats.distribution {
        let cells: String = team
            .counts
            .iter()
            .map(|c| format!("<td class=\"num\">{}</td>", c))
            .collect();
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td>{}</tr>\n",
            flag_img(flags.get(&team.team_id)),
            escape(&team.team_name),
            cells
        ));
    }
    html.push_str("</tbody>\n</table>");
    html
}
