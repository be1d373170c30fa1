//! End-to-end tests of the dashboard router against a fake FIFA API.

mod common;

use axum::http::{header, StatusCode};
use common::{dashboard, spawn_fake_api, Browser, FakeOptions, BRA_FLAG, PASSWORD, USER};

async fn signed_in(options: FakeOptions) -> (common::FakeApi, Browser) {
    let api = spawn_fake_api(options).await;
    let mut browser = Browser::new(dashboard(&api));
    let response = browser.login().await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    (api, browser)
}

#[tokio::test]
async fn test_pages_require_login() {
    let api = spawn_fake_api(FakeOptions::default()).await;
    let mut browser = Browser::new(dashboard(&api));

    for uri in ["/", "/timeline", "/statistics", "/infographic", "/flags/BRA"] {
        let response = browser.get(uri).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(response.location(), Some("/login"), "{}", uri);
    }

    let response = browser.get("/login").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text().contains("name=\"password\""));

    // Nothing was fetched for anonymous visitors
    assert_eq!(api.hits("/"), 0);
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let api = spawn_fake_api(FakeOptions::default()).await;
    let mut browser = Browser::new(dashboard(&api));

    let response = browser
        .post_form("/login", &format!("username={}&password=wrong", USER))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.text().contains("Invalid username or password"));
    assert!(response.set_cookie("ffwc_user").is_none());

    let response = browser.get("/").await;
    assert_eq!(response.location(), Some("/login"));
}

#[tokio::test]
async fn test_remember_me_controls_cookie_lifetime() {
    let api = spawn_fake_api(FakeOptions::default()).await;

    let mut browser = Browser::new(dashboard(&api));
    let response = browser
        .post_form("/login", &format!("username={}&password={}&remember=on", USER, PASSWORD))
        .await;
    let cookie = response.set_cookie("ffwc_user").unwrap();
    assert!(cookie.contains("Max-Age=604800"));
    assert!(cookie.contains("HttpOnly"));

    let mut browser = Browser::new(dashboard(&api));
    let response = browser.login().await;
    let cookie = response.set_cookie("ffwc_user").unwrap();
    assert!(!cookie.contains("Max-Age"));
}

#[tokio::test]
async fn test_login_page_redirects_when_signed_in() {
    let (_api, mut browser) = signed_in(FakeOptions::default()).await;
    let response = browser.get("/login").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));
}

#[tokio::test]
async fn test_home_lists_matches() {
    let (_api, mut browser) = signed_in(FakeOptions::default()).await;

    let response = browser.get("/").await;
    assert_eq!(response.status, StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Signed in as: coach"));
    assert!(html.contains("First Stage | Group A | Brazil vs Iran | 2024-09-14"));
    assert!(html.contains("Brazil vs Argentina"));
    assert!(html.contains("Select a match..."));
    assert!(!html.contains("Timeline: Attacking Actions"));
}

#[tokio::test]
async fn test_selected_match_shows_timeline_and_score() {
    let (_api, mut browser) = signed_in(FakeOptions::default()).await;

    let response = browser.get("/?match=M1").await;
    assert_eq!(response.status, StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Timeline: Attacking Actions (Attempts &amp; Goals)"));
    assert!(html.contains("<strong>Score:</strong> Brazil (2) - Iran (0)"));
    assert!(html.contains("DYEGO"));
    assert!(html.contains("SAEID"));
    // Fouls are not attacking actions
    assert!(!html.contains("<td>Foul</td>"));
    // Only Brazil has a flag image upstream
    assert!(html.contains("src=\"/flags/BRA\""));
    assert!(!html.contains("src=\"/flags/IRN\""));
    assert!(browser.has_cookie("ffwc_match"));
}

#[tokio::test]
async fn test_selection_carries_over_to_other_pages() {
    let (_api, mut browser) = signed_in(FakeOptions::default()).await;
    browser.get("/?match=M1").await;

    let response = browser.get("/timeline").await;
    assert_eq!(response.status, StatusCode::OK);
    let html = response.text();
    assert!(html.contains("<h1>Timeline: Attacking Actions</h1>"));
    assert!(html.contains("Brazil vs Iran"));
    assert!(html.contains("href=\"/statistics?match=M1\""));
}

#[tokio::test]
async fn test_pages_without_selection_point_home() {
    let (_api, mut browser) = signed_in(FakeOptions::default()).await;

    for uri in ["/timeline", "/statistics", "/infographic"] {
        let response = browser.get(uri).await;
        assert_eq!(response.status, StatusCode::OK, "{}", uri);
        assert!(response.text().contains("Go to Home to select a match first."), "{}", uri);
    }

    // Unknown ids select nothing
    let response = browser.get("/statistics?match=NOPE").await;
    assert!(response.text().contains("Go to Home to select a match first."));
}

#[tokio::test]
async fn test_statistics_page() {
    let (_api, mut browser) = signed_in(FakeOptions::default()).await;

    let response = browser.get("/statistics?match=M1").await;
    assert_eq!(response.status, StatusCode::OK);
    let html = response.text();
    assert!(html.contains("<h2>Count of events by team</h2>"));
    assert!(html.contains("<h2>Event distribution by team</h2>"));
    assert!(html.contains("Attempt at Goal, Foul, Goal!, Assist, Corner"));
    assert_eq!(html.matches("<svg").count(), 2);
}

#[tokio::test]
async fn test_infographic_page() {
    let (_api, mut browser) = signed_in(FakeOptions::default()).await;

    let response = browser.get("/infographic?match=M1").await;
    assert_eq!(response.status, StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Infographic: FIFA Futsal World Cup"));
    assert!(html.contains("Score: Brazil 2 - 0 Iran"));
    assert!(html.contains("First Stage &bull; Group A"));
    assert!(html.contains("(G)"));
    assert!(html.contains("Attacking participation"));
    assert_eq!(html.matches("<svg").count(), 4);
}

#[tokio::test]
async fn test_api_responses_are_cached() {
    let (api, mut browser) = signed_in(FakeOptions::default()).await;

    browser.get("/?match=M1").await;
    browser.get("/?match=M1").await;
    browser.get("/statistics").await;
    browser.get("/infographic").await;

    assert_eq!(api.hits("/calendar/matches"), 1);
    assert_eq!(api.hits("/timelines/"), 1);
    assert_eq!(api.hits("/teams/T1/squad"), 1);
    assert_eq!(api.hits("/teams/T2/squad"), 1);
    assert_eq!(api.hits("/competitions/teams/"), 1);
    assert_eq!(api.hits("/picture/flags-sq-4/BRA"), 1);
}

#[tokio::test]
async fn test_api_failure_shows_error_page() {
    let (_api, mut browser) = signed_in(FakeOptions { fail_calendar: true }).await;

    let response = browser.get("/").await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    let html = response.text();
    assert!(html.contains("Could not load data from the FIFA API."));
    assert!(html.contains("Reload the page to try again."));
    // Still signed in
    assert!(browser.has_cookie("ffwc_user"));
}

#[tokio::test]
async fn test_flag_route() {
    let (api, mut browser) = signed_in(FakeOptions::default()).await;

    let response = browser.get("/flags/BRA").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::CONTENT_TYPE], "image/png");
    assert_eq!(response.bytes, BRA_FLAG);

    browser.get("/flags/BRA").await;
    assert_eq!(api.hits("/picture/flags-sq-4/BRA"), 1);

    let response = browser.get("/flags/IRN").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // Invalid codes never reach the API
    let response = browser.get("/flags/TOOLONGCODE").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(api.hits("/picture/flags-sq-4/TOOLONGCODE"), 0);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let (_api, mut browser) = signed_in(FakeOptions::default()).await;
    browser.get("/?match=M1").await;

    let response = browser.post_form("/logout", "").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));
    assert!(!browser.has_cookie("ffwc_user"));
    assert!(!browser.has_cookie("ffwc_match"));

    let response = browser.get("/").await;
    assert_eq!(response.location(), Some("/login"));
}
