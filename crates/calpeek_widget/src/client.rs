// --- File: crates/calpeek_widget/src/client.rs ---
//! HTTP client of the calpeek API as seen from the browser side.

use async_trait::async_trait;
use calpeek_common::models::{AvailabilityResult, SessionResponse};
use reqwest::{header::COOKIE, Client, RequestBuilder, Response};
use serde_json::Value;
use thiserror::Error;

use crate::auth_panel::SessionStatus;

/// Why an availability fetch did not produce a result.
///
/// The `Display` text is what the widget shows in its error state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The endpoint answered with a non-success status.
    #[error("{message}")]
    Endpoint { status: u16, message: String },
    /// The request failed or the response could not be read.
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

/// Message to show for a failed response: the body's `message` field when
/// there is one, otherwise a generic text naming the status.
pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}

/// Source of availability results for the widget.
#[async_trait]
pub trait AvailabilityFetcher: Send + Sync + 'static {
    async fn fetch(&self, days: u32) -> Result<AvailabilityResult, FetchError>;
}

/// Client of the calpeek `/api` routes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    cookie: Option<String>,
}

impl ApiClient {
    /// `base_url` is the server origin, e.g. `http://127.0.0.1:8086`.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cookie: None,
        }
    }

    /// Sends `cookie` with every request, identifying the user's session.
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self.client.get(format!("{}/api{}", self.base_url, path));
        match &self.cookie {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        }
    }

    /// Loads the session for the sign-in panel. Never fails: problems become
    /// [`SessionStatus::Failed`].
    pub async fn session(&self) -> SessionStatus {
        let response = match self.get("/session").send().await {
            Ok(response) => response,
            Err(e) => return SessionStatus::Failed(Some(e.to_string())),
        };
        match read_json::<SessionResponse>(response).await {
            Ok(body) => SessionStatus::Resolved(body.session),
            Err(e) => SessionStatus::Failed(Some(e.to_string())),
        }
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(FetchError::Endpoint {
            status: status.as_u16(),
            message: error_message(status.as_u16(), &body),
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| FetchError::Transport(format!("Invalid response: {e}")))
}

#[async_trait]
impl AvailabilityFetcher for ApiClient {
    async fn fetch(&self, days: u32) -> Result<AvailabilityResult, FetchError> {
        let response = self
            .get("/google/freebusy")
            .query(&[("days", days)])
            .send()
            .await?;
        read_json(response).await
    }
}
