//! Dashboard pages: Home, Timeline, Statistics and Infographic.
//!
//! Each request fetches what it needs through the shared caches and renders
//! the page in one pass. The selected match comes from `?match=` or, when
//! absent, from the match cookie.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::Extension;
use axum_extra::extract::cookie::SignedCookieJar;
use futsal_core::models::{FlagAsset, Match};
use futsal_core::stats::{
    build_attack_actions, build_minute_matrix, compute_event_stats, goals_only, score,
    smoothed_curves, top_players, SMOOTH_TAU_MIN, TOP_N_PLAYERS, WHITELIST_EVENTS,
};
use futsal_core::utils::format_kickoff;
use futsal_core::MatchDatasets;
use serde::Deserialize;
use tracing::debug;

use super::CurrentUser;
use crate::error::PageError;
use crate::render::layout::{self, Nav, PageContext, NO_MATCH_SELECTED};
use crate::render::{charts, escape, tables};
use crate::session::{forget_match, remember_match, selected_match};
use crate::state::AppState;

type PageResult = Result<(SignedCookieJar, Html<String>), PageError>;

#[derive(Debug, Default, Deserialize)]
pub struct MatchQuery {
    #[serde(rename = "match")]
    pub match_id: Option<String>,
}

/// Resolve the requested match (query first, then cookie) against the
/// calendar and remember it. Unknown ids select nothing.
fn resolve_selection(
    jar: SignedCookieJar,
    query: &MatchQuery,
    matches: &[Match],
) -> (SignedCookieJar, Option<Match>) {
    let requested = query
        .match_id
        .clone()
        .filter(|id| !id.is_empty())
        .or_else(|| selected_match(&jar));
    let Some(id) = requested else {
        return (jar, None);
    };

    match matches.iter().find(|m| m.match_id == id) {
        Some(m) => (remember_match(jar, &m.match_id), Some(m.clone())),
        None => {
            debug!(match_id = %id, "Selected match is not in the calendar");
            (forget_match(jar), None)
        }
    }
}

/// Match data shared by the per-match pages
struct MatchData {
    datasets: MatchDatasets,
    flags: HashMap<String, FlagAsset>,
}

async fn load_match(state: &AppState, m: &Match) -> Result<MatchData, PageError> {
    let datasets = state.data.match_datasets(m).await?;
    let flags = state
        .data
        .team_flags(&[m.home_id.as_str(), m.away_id.as_str()])
        .await;
    Ok(MatchData { datasets, flags })
}

/// Calendar lookup plus selection; `None` when nothing is selected
async fn selected(
    state: &AppState,
    jar: SignedCookieJar,
    query: &MatchQuery,
) -> Result<(SignedCookieJar, Option<Match>), PageError> {
    let matches = state.data.matches().await?;
    Ok(resolve_selection(jar, query, &matches.data))
}

fn render(nav: Nav, title: &str, user: &CurrentUser, m: Option<&Match>, footer: Option<String>, body: &str) -> Html<String> {
    let ctx = PageContext {
        title,
        active: nav,
        username: &user.0,
        match_id: m.map(|m| m.match_id.as_str()),
        footer,
    };
    Html(layout::page(&ctx, body))
}

fn data_footer(data: &MatchData) -> Option<String> {
    Some(format!("Match data fetched {}", data.datasets.age_display()))
}

pub async fn home(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: SignedCookieJar,
    Query(query): Query<MatchQuery>,
) -> PageResult {
    let matches = state.data.matches().await?;
    let (jar, selection) = resolve_selection(jar, &query, &matches.data);

    let mut body = String::from(
        "<h1>FIFA Futsal World Cup: Matches &amp; Timelines</h1>\n\
         <p class=\"caption\">Select a match below. The attacking timeline will appear under the box.</p>\n",
    );
    let options = tables::match_options(&matches.data);
    if options.is_empty() {
        body.push_str(&layout::notice("No matches retrieved from the API."));
    } else {
        body.push_str("<h2>Select a match</h2>\n");
        body.push_str(&tables::match_selector(
            &options,
            selection.as_ref().map(|m| m.match_id.as_str()),
        ));
    }

    let mut footer = format!("Matches fetched {}", matches.age_display());
    if let Some(m) = &selection {
        let data = load_match(&state, m).await?;
        body.push_str("\n<h2>Timeline: Attacking Actions (Attempts &amp; Goals)</h2>\n");
        body.push_str(&tables::match_caption(m, Some(score(&data.datasets.events, m))));
        body.push_str(&tables::timeline_table(&data.datasets.timeline, &data.flags));
        footer = format!("Match data fetched {}", data.datasets.age_display());
    }

    Ok((jar, render(Nav::Home, "Home", &user, selection.as_ref(), Some(footer), &body)))
}

pub async fn timeline(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: SignedCookieJar,
    Query(query): Query<MatchQuery>,
) -> PageResult {
    let (jar, selection) = selected(&state, jar, &query).await?;
    let Some(m) = selection else {
        let body = layout::notice(NO_MATCH_SELECTED);
        return Ok((jar, render(Nav::Timeline, "Timeline", &user, None, None, &body)));
    };

    let data = load_match(&state, &m).await?;
    let body = format!(
        "<h1>Timeline: Attacking Actions</h1>\n{}\n{}",
        tables::match_caption(&m, None),
        tables::timeline_table(&data.datasets.timeline, &data.flags)
    );
    Ok((jar, render(Nav::Timeline, "Timeline", &user, Some(&m), data_footer(&data), &body)))
}

pub async fn statistics(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: SignedCookieJar,
    Query(query): Query<MatchQuery>,
) -> PageResult {
    let (jar, selection) = selected(&state, jar, &query).await?;
    let Some(m) = selection else {
        let body = layout::notice(NO_MATCH_SELECTED);
        return Ok((jar, render(Nav::Statistics, "Statistics", &user, None, None, &body)));
    };

    let data = load_match(&state, &m).await?;
    let palette = state.data.palette(&m, &state.team_colors).await;
    let stats = compute_event_stats(&data.datasets.events, &m);

    let body = format!(
        "<h1>Statistics</h1>\n{caption}\n\
         <p class=\"caption\">Computed from the full timeline (before filtering attacking actions).</p>\n\
         <h2>Count of events by team</h2>\n{counts}\n<div class=\"charts\">{counts_chart}</div>\n\
         <h2>Event distribution by team</h2>\n<p class=\"caption\">Events: {events}</p>\n\
         {dist}\n<div class=\"charts\">{dist_chart}</div>",
        caption = tables::match_caption(&m, None),
        counts = tables::event_counts_table(&stats, &data.flags),
        counts_chart = charts::event_counts_chart(&stats, &palette),
        events = escape(&WHITELIST_EVENTS.join(", ")),
        dist = tables::event_distribution_table(&stats, &data.flags),
        dist_chart = charts::distribution_chart(&stats, &palette),
    );
    Ok((jar, render(Nav::Statistics, "Statistics", &user, Some(&m), data_footer(&data), &body)))
}

pub async fn infographic(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: SignedCookieJar,
    Query(query): Query<MatchQuery>,
) -> PageResult {
    let (jar, selection) = selected(&state, jar, &query).await?;
    let Some(m) = selection else {
        let body = layout::notice(NO_MATCH_SELECTED);
        return Ok((jar, render(Nav::Infographic, "Infographic", &user, None, None, &body)));
    };

    let data = load_match(&state, &m).await?;
    let palette = state.data.palette(&m, &state.team_colors).await;
    let events = &data.datasets.events;

    let actions = build_attack_actions(events, &m, &data.datasets.squads);
    let matrix = build_minute_matrix(&actions, &m);
    let curves = smoothed_curves(&matrix, SMOOTH_TAU_MIN);
    let players = top_players(&actions, TOP_N_PLAYERS);
    let (home_goals, away_goals) = score(events, &m);

    let body = format!(
        "<div class=\"info-header\">\n<div>{home_flag}</div>\n<div class=\"center\">\n\
         <h1>Infographic: FIFA Futsal World Cup</h1>\n\
         <p>{stage} &bull; {group} &bull; {date}</p>\n\
         <p><strong>Score: {home} {home_goals} - {away_goals} {away}</strong></p>\n\
         <p class=\"legend\"><span style=\"background:{home_color}\"></span>{home}\
         <span style=\"background:{away_color}\"></span>{away}</p>\n\
         </div>\n<div>{away_flag}</div>\n</div>\n\
         <div class=\"charts\">\n{momentum}\n{smoothed}\n{top}\n{cumulative}\n</div>",
        home_flag = tables::flag_img(data.flags.get(&m.home_id)),
        away_flag = tables::flag_img(data.flags.get(&m.away_id)),
        stage = escape(&m.stage_name),
        group = escape(&m.group_name),
        date = escape(&format_kickoff(m.kickoff)),
        home = escape(&m.home_name),
        away = escape(&m.away_name),
        home_color = escape(&palette.home_color),
        away_color = escape(&palette.away_color),
        momentum = charts::momentum_chart(&matrix, &goals_only(&actions), &m, &palette),
        smoothed = charts::smoothed_chart(&curves, &m, &palette),
        top = charts::top_players_chart(&players, &m, &palette),
        cumulative = charts::cumulative_chart(&actions, &m, &palette),
    );
    Ok((jar, render(Nav::Infographic, "Infographic", &user, Some(&m), data_footer(&data), &body)))
}
