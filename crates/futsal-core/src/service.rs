//! Cached, typed access to the tournament data.
//!
//! `FutsalData` composes the `ApiClient` with two response caches (JSON
//! payloads and flag images) and decodes payloads into the domain models.
//! Each dataset has its own time-to-live; squads, teams and flags change
//! rarely and are kept for a day.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use futures::future::{join_all, try_join_all};
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{flag_endpoint, ApiClient, ApiRequest, FetchError};
use crate::cache::{CachedData, ResponseCache};
use crate::colors::{pick_match_colors, MatchPalette, TeamColors};
use crate::config::ApiConfig;
use crate::models::{
    abbreviations_by_team_id, parse_events, parse_matches, parse_squad, parse_teams, FlagAsset,
    FlagImage, Match, MatchEvent, Player, Team,
};
use crate::stats::{process_timeline, TimelineRow};

// ============================================================================
// Constants
// ============================================================================

/// Match calendar lifetime in the cache (1 hour)
const MATCHES_TTL_SECS: i64 = 3600;

/// Timeline lifetime; events change while a match is played (30 minutes)
const EVENTS_TTL_SECS: i64 = 1800;

/// Squads, teams and flags rarely change (24 hours)
const SQUADS_TTL_SECS: i64 = 86_400;
const TEAMS_TTL_SECS: i64 = 86_400;
const FLAGS_TTL_SECS: i64 = 86_400;

/// Longest FIFA country code accepted for flag requests
const MAX_COUNTRY_CODE_LEN: usize = 5;

/// Everything the match pages need about one match
#[derive(Debug, Clone)]
pub struct MatchDatasets {
    pub events: Vec<MatchEvent>,
    pub squads: Vec<Player>,
    pub timeline: Vec<TimelineRow>,
    /// When the oldest of the underlying responses was fetched
    pub fetched_at: DateTime<Utc>,
}

impl MatchDatasets {
    pub fn age_display(&self) -> String {
        CachedData::at((), self.fetched_at).age_display()
    }
}

/// Country codes are short alphanumerics; anything else is never requested
pub fn is_valid_country_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_COUNTRY_CODE_LEN
        && code.chars().all(|c| c.is_ascii_alphanumeric())
}

pub struct FutsalData {
    client: ApiClient,
    api: ApiConfig,
    responses: ResponseCache<Value>,
    flags: ResponseCache<FlagImage>,
}

impl FutsalData {
    pub fn new(client: ApiClient, api: ApiConfig) -> Self {
        Self {
            client,
            api,
            responses: ResponseCache::new(),
            flags: ResponseCache::new(),
        }
    }

    async fn fetch_json(&self, request: &ApiRequest, ttl_secs: i64) -> Result<CachedData<Value>, FetchError> {
        self.responses
            .get_or_fetch(&request.fingerprint(), Duration::seconds(ttl_secs), || {
                self.client.fetch_request(request)
            })
            .await
    }

    /// Season calendar
    pub async fn matches(&self) -> Result<CachedData<Vec<Match>>, FetchError> {
        let request = ApiRequest::matches(&self.api.season_id, self.api.matches_count);
        let cached = self.fetch_json(&request, MATCHES_TTL_SECS).await?;
        let matches = parse_matches(&cached.data);
        debug!(count = matches.len(), "Loaded matches");
        Ok(CachedData::at(matches, cached.cached_at))
    }

    /// Timeline events of a match
    pub async fn match_events(&self, m: &Match) -> Result<CachedData<Vec<MatchEvent>>, FetchError> {
        let request = ApiRequest::timeline(
            &self.api.competition_id,
            &self.api.season_id,
            &self.api.stage_id,
            &m.match_id,
        );
        let cached = self.fetch_json(&request, EVENTS_TTL_SECS).await?;
        Ok(CachedData::at(parse_events(&cached.data), cached.cached_at))
    }

    /// Squads of the given teams, one cached request per team
    pub async fn squads(&self, team_ids: &[&str]) -> Result<CachedData<Vec<Player>>, FetchError> {
        let requests: Vec<ApiRequest> = team_ids
            .iter()
            .filter(|id| !id.is_empty())
            .map(|id| ApiRequest::squad(id, &self.api.competition_id, &self.api.season_id))
            .collect();

        let responses = try_join_all(requests.iter().map(|r| self.fetch_json(r, SQUADS_TTL_SECS))).await?;

        let fetched_at = responses
            .iter()
            .map(|c| c.cached_at)
            .min()
            .unwrap_or_else(Utc::now);
        let players = responses.iter().flat_map(|c| parse_squad(&c.data)).collect();
        Ok(CachedData::at(players, fetched_at))
    }

    /// Teams of the season, with their country codes
    pub async fn teams(&self) -> Result<CachedData<Vec<Team>>, FetchError> {
        let request = ApiRequest::teams(&self.api.season_id);
        let cached = self.fetch_json(&request, TEAMS_TTL_SECS).await?;
        Ok(CachedData::at(parse_teams(&cached.data), cached.cached_at))
    }

    /// Events, squads and the processed timeline of a match
    pub async fn match_datasets(&self, m: &Match) -> Result<MatchDatasets, FetchError> {
        let team_ids = [m.home_id.as_str(), m.away_id.as_str()];
        let (events, squads) = futures::try_join!(self.match_events(m), self.squads(&team_ids))?;

        let timeline = process_timeline(&events.data, m, &squads.data);
        Ok(MatchDatasets {
            fetched_at: events.cached_at.min(squads.cached_at),
            events: events.data,
            squads: squads.data,
            timeline,
        })
    }

    /// Flag image for a country code; `None` on any failure
    pub async fn flag_image(&self, country_code: &str) -> Option<FlagImage> {
        if !is_valid_country_code(country_code) {
            debug!(code = country_code, "Rejected flag code");
            return None;
        }
        let endpoint = flag_endpoint(country_code);
        match self
            .flags
            .get_or_fetch(country_code, Duration::seconds(FLAGS_TTL_SECS), || {
                self.client.fetch_bytes(&endpoint)
            })
            .await
        {
            Ok(cached) => Some(cached.data),
            Err(e) => {
                debug!(code = country_code, error = %e, "Flag unavailable, skipping");
                None
            }
        }
    }

    pub async fn flag_asset(&self, country_code: &str) -> FlagAsset {
        FlagAsset {
            country_code: country_code.to_string(),
            image: self.flag_image(country_code).await,
        }
    }

    /// Flags of the given teams keyed by team id. Teams without a country
    /// code, or whose flag could not be fetched, have no image. A failure to
    /// load the team list only costs the flags.
    pub async fn team_flags(&self, team_ids: &[&str]) -> HashMap<String, FlagAsset> {
        let abbreviations = match self.teams().await {
            Ok(teams) => abbreviations_by_team_id(&teams.data),
            Err(e) => {
                warn!(error = %e, "Team list unavailable, rendering without flags");
                HashMap::new()
            }
        };

        let lookups = team_ids.iter().map(|id| {
            let code = abbreviations.get(*id).cloned().unwrap_or_default();
            async move {
                let asset = if code.is_empty() {
                    FlagAsset { country_code: code, image: None }
                } else {
                    self.flag_asset(&code).await
                };
                (id.to_string(), asset)
            }
        });
        join_all(lookups).await.into_iter().collect()
    }

    /// Chart colours for a match, using country codes when the team list
    /// is available
    pub async fn palette(&self, m: &Match, table: &HashMap<String, TeamColors>) -> MatchPalette {
        let abbreviations = self
            .teams()
            .await
            .map(|teams| abbreviations_by_team_id(&teams.data))
            .unwrap_or_default();
        pick_match_colors(
            table,
            &m.home_name,
            &m.away_name,
            abbreviations.get(&m.home_id).map(String::as_str),
            abbreviations.get(&m.away_id).map(String::as_str),
        )
    }
}
