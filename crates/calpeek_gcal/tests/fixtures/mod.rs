//! Test fixtures for the free/busy integration tests
//!
//! Builds configuration pointing the endpoint at local mock servers for the
//! auth service and the Google Free/Busy API.

use calpeek_config::{AppConfig, AuthConfig, GcalConfig, LoggingConfig, ServerConfig, FREEBUSY_SCOPE};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const FREEBUSY_PATH: &str = "/calendar/v3/freeBusy";
pub const ACCESS_TOKEN: &str = "ya29.a0-test";

/// The instant every request in these tests is received at.
pub fn request_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap()
}

/// Creates an AppConfig whose collaborators live at the given URLs
pub fn create_config(auth_base_url: &str, freebusy_url: &str) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8086,
        },
        logging: LoggingConfig::default(),
        use_gcal: true,
        auth: Some(AuthConfig {
            base_url: auth_base_url.to_string(),
        }),
        gcal: Some(GcalConfig {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            scopes: vec![FREEBUSY_SCOPE.to_string()],
            access_type: "offline".to_string(),
            freebusy_url: freebusy_url.to_string(),
            request_timeout_secs: None,
        }),
    }
}

/// Mounts an auth service that grants `ACCESS_TOKEN` to every caller.
pub async fn signed_in_auth_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/get-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": ACCESS_TOKEN,
            "scopes": [FREEBUSY_SCOPE]
        })))
        .mount(&server)
        .await;
    server
}

/// Mounts an auth service that knows no session.
pub async fn signed_out_auth_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/get-access-token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})))
        .mount(&server)
        .await;
    server
}

/// A Free/Busy response body for the primary calendar.
pub fn freebusy_body(busy: Value) -> Value {
    json!({
        "kind": "calendar#freeBusy",
        "timeMin": "2024-01-02T08:00:00.000Z",
        "timeMax": "2024-01-09T08:00:00.000Z",
        "calendars": {"primary": {"busy": busy}}
    })
}
