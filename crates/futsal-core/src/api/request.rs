//! Request descriptions for the FIFA API endpoints the dashboard reads.

use std::fmt;

/// Path of the square flag images, relative to the API base URL.
pub const FLAG_PATH: &str = "/picture/flags-sq-4";

/// A GET request against the API: endpoint path plus query parameters.
///
/// The `language` parameter is added by the client and is not part of the
/// request description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub endpoint: String,
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }

    /// Match calendar for a season
    pub fn matches(season_id: &str, count: u32) -> Self {
        Self::new("/calendar/matches")
            .param("idSeason", season_id)
            .param("count", count.to_string())
    }

    /// Event timeline of a single match
    pub fn timeline(competition_id: &str, season_id: &str, stage_id: &str, match_id: &str) -> Self {
        Self::new(format!(
            "/timelines/{}/{}/{}/{}",
            competition_id, season_id, stage_id, match_id
        ))
    }

    /// Squad (player list) of a team within a competition season
    pub fn squad(team_id: &str, competition_id: &str, season_id: &str) -> Self {
        Self::new(format!("/teams/{}/squad", team_id))
            .param("idCompetition", competition_id)
            .param("idSeason", season_id)
    }

    /// All teams taking part in a season
    pub fn teams(season_id: &str) -> Self {
        Self::new(format!("/competitions/teams/{}", season_id))
    }

    /// Cache key for this request.
    ///
    /// Parameters are sorted by key so two requests that only differ in
    /// parameter order share an entry.
    pub fn fingerprint(&self) -> String {
        if self.params.is_empty() {
            return self.endpoint.clone();
        }
        let mut params: Vec<&(String, String)> = self.params.iter().collect();
        params.sort();
        let query: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        format!("{}?{}", self.endpoint, query.join("&"))
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fingerprint())
    }
}

/// Endpoint of the flag image for a FIFA country code such as `ARG`
pub fn flag_endpoint(country_code: &str) -> String {
    format!("{}/{}", FLAG_PATH, country_code)
}
