//! Test support: a fake FIFA API on an ephemeral port and a cookie-keeping
//! client for the dashboard router.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::extract::{Path, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::cookie::Key;
use futsal_core::auth::UserDirectory;
use futsal_core::Config;
use futsal_dashboard::{build_router, AppState};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const USER: &str = "coach";
pub const PASSWORD: &str = "secret";

/// Bytes served as the Brazil flag
pub const BRA_FLAG: &[u8] = b"\x89PNG\r\n\x1a\nfake-flag";

#[derive(Debug, Clone, Copy, Default)]
pub struct FakeOptions {
    /// Calendar endpoint answers 500
    pub fail_calendar: bool,
}

#[derive(Clone)]
struct FakeState {
    requests: Arc<Mutex<Vec<String>>>,
    options: FakeOptions,
}

/// Running fake API
pub struct FakeApi {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeApi {
    /// Requests received whose path starts with `prefix`
    pub fn hits(&self, prefix: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|path| path.starts_with(prefix))
            .count()
    }
}

async fn record(State(state): State<FakeState>, request: Request, next: Next) -> Response {
    state
        .requests
        .lock()
        .unwrap()
        .push(request.uri().path().to_string());
    next.run(request).await
}

fn localized(text: &str) -> Value {
    json!([{ "Locale": "en-GB", "Description": text }])
}

async fn calendar(State(state): State<FakeState>) -> Response {
    if state.options.fail_calendar {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream down").into_response();
    }
    Json(json!({
        "Results": [
            {
                "IdMatch": "M2",
                "StageName": localized("Final"),
                "GroupName": [],
                "LocalDate": "2024-10-06T19:00:00Z",
                "Home": { "IdTeam": "T1", "ShortClubName": "Brazil" },
                "Away": { "IdTeam": "T3", "ShortClubName": "Argentina" }
            },
            {
                "IdMatch": "M1",
                "StageName": localized("First Stage"),
                "GroupName": localized("Group A"),
                "LocalDate": "2024-09-14T17:30:00Z",
                "Home": { "IdTeam": "T1", "ShortClubName": "Brazil" },
                "Away": { "IdTeam": "T2", "ShortClubName": "Iran" }
            }
        ]
    }))
    .into_response()
}

fn event(team: &str, player: &str, kind: &str, minute: &str) -> Value {
    json!({
        "IdTeam": team,
        "IdPlayer": player,
        "TypeLocalized": localized(kind),
        "MatchMinute": minute
    })
}

async fn timeline(Path((_, _, _, match_id)): Path<(String, String, String, String)>) -> Json<Value> {
    let events = if match_id == "M1" {
        vec![
            event("T1", "P1", "Goal!", "3'"),
            event("T2", "P2", "Attempt at Goal", "5'"),
            event("T2", "P2", "Foul", "6'"),
            event("T1", "P1", "Goal!", "31'"),
        ]
    } else {
        Vec::new()
    };
    Json(json!({ "Event": events }))
}

async fn squad(Path(team): Path<String>) -> Json<Value> {
    let players = match team.as_str() {
        "T1" => vec![json!({ "IdTeam": "T1", "IdPlayer": "P1", "ShortName": localized("DYEGO") })],
        "T2" => vec![json!({ "IdTeam": "T2", "IdPlayer": "P2", "ShortName": localized("SAEID") })],
        _ => Vec::new(),
    };
    Json(json!({ "Players": players }))
}

async fn teams() -> Json<Value> {
    Json(json!({
        "Results": [
            { "IdTeam": "T1", "ShortClubName": "Brazil", "Abbreviation": "BRA" },
            { "IdTeam": "T2", "ShortClubName": "Iran", "Abbreviation": "IRN" },
            { "IdTeam": "T3", "ShortClubName": "Argentina", "Abbreviation": "ARG" }
        ]
    }))
}

/// Only Brazil's flag exists
async fn flag(Path(code): Path<String>) -> Response {
    if code == "BRA" {
        ([(header::CONTENT_TYPE, "image/png")], BRA_FLAG).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

pub async fn spawn_fake_api(options: FakeOptions) -> FakeApi {
    let state = FakeState {
        requests: Arc::new(Mutex::new(Vec::new())),
        options,
    };
    let app = Router::new()
        .route("/calendar/matches", get(calendar))
        .route("/timelines/{competition}/{season}/{stage}/{match_id}", get(timeline))
        .route("/teams/{team}/squad", get(squad))
        .route("/competitions/teams/{season}", get(teams))
        .route("/picture/flags-sq-4/{code}", get(flag))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeApi {
        base_url: format!("http://{}", addr),
        requests: state.requests,
    }
}

/// Dashboard router talking to `api`, with a single `coach` account
pub fn dashboard(api: &FakeApi) -> Router {
    let mut config = Config::default();
    config.api.base_url = api.base_url.clone();
    let users = UserDirectory::new(HashMap::from([(USER.to_string(), PASSWORD.to_string())]));
    let state = AppState::from_config(&config, users, Key::generate()).unwrap();
    build_router(state)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }

    /// Raw `Set-Cookie` header for `name`
    pub fn set_cookie(&self, name: &str) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&format!("{}=", name)))
            .map(str::to_string)
    }
}

/// Sends requests to the router and keeps cookies between them
pub struct Browser {
    app: Router,
    cookies: BTreeMap<String, String>,
}

impl Browser {
    pub fn new(app: Router) -> Self {
        Self {
            app,
            cookies: BTreeMap::new(),
        }
    }

    pub fn has_cookie(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    async fn send(&mut self, builder: axum::http::request::Builder, body: Body) -> TestResponse {
        let builder = if self.cookies.is_empty() {
            builder
        } else {
            let cookie: Vec<String> = self
                .cookies
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            builder.header(header::COOKIE, cookie.join("; "))
        };
        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        for value in response.headers().get_all(header::SET_COOKIE) {
            let value = value.to_str().unwrap();
            let pair = value.split(';').next().unwrap_or_default();
            let (name, val) = pair.split_once('=').unwrap();
            if val.is_empty() || value.contains("Max-Age=0") {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_string(), val.to_string());
            }
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
        TestResponse { status, headers, bytes }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let builder = axum::http::Request::builder().method("GET").uri(uri);
        self.send(builder, Body::empty()).await
    }

    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        let builder = axum::http::Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(builder, Body::from(form.to_string())).await
    }

    pub async fn login(&mut self) -> TestResponse {
        let form = format!("username={}&password={}", USER, PASSWORD);
        self.post_form("/login", &form).await
    }
}
