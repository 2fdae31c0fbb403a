mod fixtures;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use calpeek_gcal::{logic::FixedClock, routes, GcalState};
use fixtures::*;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{any, header as header_is, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(auth_base_url: &str, freebusy_url: &str) -> Router {
    let config = create_config(auth_base_url, freebusy_url);
    let state = GcalState::from_config(&config)
        .expect("state from config")
        .with_clock(Arc::new(FixedClock(request_time())));
    routes(Arc::new(state))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::COOKIE, "session_token=abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let cache_control = response
        .headers()
        .get(header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, cache_control, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_busy_intervals_round_trip_unchanged() {
    let auth = signed_in_auth_server().await;
    let google = MockServer::start().await;
    let busy = json!([{"start": "2024-01-02T10:00:00Z", "end": "2024-01-02T11:00:00Z"}]);
    Mock::given(method("POST"))
        .and(path(FREEBUSY_PATH))
        .and(header_is("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(freebusy_body(busy.clone())))
        .expect(1)
        .mount(&google)
        .await;

    let (status, cache_control, body) = get(
        app(&auth.uri(), &format!("{}{}", google.uri(), FREEBUSY_PATH)),
        "/google/freebusy",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache_control.as_deref(), Some("no-store"));
    assert_eq!(body["calendarId"], "primary");
    assert_eq!(body["timeMin"], "2024-01-02T08:00:00.000Z");
    assert_eq!(body["timeMax"], "2024-01-09T08:00:00.000Z");
    assert_eq!(body["busy"], busy);
}

#[tokio::test]
async fn test_signed_out_caller_never_reaches_google() {
    let auth = signed_out_auth_server().await;
    let google = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&google)
        .await;

    let (status, _, body) = get(
        app(&auth.uri(), &format!("{}{}", google.uri(), FREEBUSY_PATH)),
        "/google/freebusy?days=5",
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_invalid_days_never_reaches_auth_or_google() {
    let auth = MockServer::start().await;
    let google = MockServer::start().await;
    for server in [&auth, &google] {
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(server)
            .await;
    }

    let (status, _, body) = get(
        app(&auth.uri(), &format!("{}{}", google.uri(), FREEBUSY_PATH)),
        "/google/freebusy?days=45",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["issues"][0]["code"], "too_big");
}

#[tokio::test]
async fn test_google_failure_status_and_body_are_forwarded() {
    let auth = signed_in_auth_server().await;
    let google = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FREEBUSY_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("Rate Limit Exceeded"))
        .expect(1)
        .mount(&google)
        .await;

    let (status, cache_control, body) = get(
        app(&auth.uri(), &format!("{}{}", google.uri(), FREEBUSY_PATH)),
        "/google/freebusy",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(cache_control, None);
    assert_eq!(
        body,
        json!({"error": "GOOGLE_API_ERROR", "status": 429, "body": "Rate Limit Exceeded"})
    );
}

#[tokio::test]
async fn test_unparseable_google_response_is_a_google_error() {
    let auth = signed_in_auth_server().await;
    let google = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&google)
        .await;

    let (status, _, body) = get(
        app(&auth.uri(), &format!("{}{}", google.uri(), FREEBUSY_PATH)),
        "/google/freebusy",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body,
        json!({"error": "GOOGLE_API_ERROR", "status": 200, "body": "not json"})
    );
}

#[tokio::test]
async fn test_unreachable_google_is_a_gateway_error() {
    let auth = signed_in_auth_server().await;
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let (status, _, body) = get(
        app(&auth.uri(), &format!("http://127.0.0.1:{port}{FREEBUSY_PATH}")),
        "/google/freebusy",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "GOOGLE_API_ERROR");
    assert_eq!(body["status"], 502);
    assert!(body["body"].is_string());
}

#[tokio::test]
async fn test_missing_sections_fail_state_construction() {
    let mut config = create_config("http://127.0.0.1:1", "http://127.0.0.1:1/freeBusy");
    config.auth = None;

    let err = GcalState::from_config(&config).err().expect("missing auth section");
    assert!(err.to_string().contains("auth configuration missing"));
}
