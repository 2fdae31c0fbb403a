// File: crates/calpeek_gcal/src/auth.rs
//! Seam to the auth service that owns sessions and delegated Google tokens.
//!
//! The endpoint never stores or refreshes tokens itself: it forwards the
//! caller's session headers and asks for a fresh credential on every request.

use async_trait::async_trait;
use axum::http::{
    header::{AUTHORIZATION, COOKIE},
    HeaderMap, StatusCode,
};
use calpeek_common::{external_service_error, models::Session, CalpeekError};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

/// Provider id of Google at the auth service.
pub const GOOGLE_PROVIDER_ID: &str = "google";

const ACCESS_TOKEN_PATH: &str = "/api/auth/get-access-token";
const SESSION_PATH: &str = "/api/auth/get-session";

/// Errors talking to the auth service.
#[derive(Error, Debug)]
pub enum AuthCollaboratorError {
    #[error("auth service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("auth service responded with status {0}")]
    Rejected(u16),
}

impl From<AuthCollaboratorError> for CalpeekError {
    fn from(err: AuthCollaboratorError) -> Self {
        external_service_error("auth", err)
    }
}

/// A token obtained through OAuth on behalf of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegatedCredential {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub access_token_expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub id_token: Option<String>,
}

impl DelegatedCredential {
    /// The access token, unless it is missing or blank.
    pub fn usable_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }
}

/// Operations the availability endpoint needs from the auth service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthCollaborator: Send + Sync {
    /// Delegated credential of the caller for `provider`, or `None` when the
    /// caller is not signed in with it.
    async fn get_access_token(
        &self,
        provider: &str,
        headers: &HeaderMap,
    ) -> Result<Option<DelegatedCredential>, AuthCollaboratorError>;

    /// The caller's session, or `None` when signed out.
    async fn get_session(&self, headers: &HeaderMap)
        -> Result<Option<Session>, AuthCollaboratorError>;
}

/// [`AuthCollaborator`] backed by the auth service's HTTP API.
#[derive(Debug, Clone)]
pub struct RemoteAuthCollaborator {
    client: Client,
    base_url: String,
}

impl RemoteAuthCollaborator {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Copies the headers that identify the caller's session.
fn session_headers(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = HeaderMap::new();
    for name in [COOKIE, AUTHORIZATION] {
        for value in headers.get_all(&name) {
            forwarded.append(name.clone(), value.clone());
        }
    }
    forwarded
}

#[async_trait]
impl AuthCollaborator for RemoteAuthCollaborator {
    async fn get_access_token(
        &self,
        provider: &str,
        headers: &HeaderMap,
    ) -> Result<Option<DelegatedCredential>, AuthCollaboratorError> {
        let response = self
            .client
            .post(self.url(ACCESS_TOKEN_PATH))
            .headers(session_headers(headers))
            .json(&json!({ "providerId": provider }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("auth service refused {} token: {}", provider, status);
            return Ok(None);
        }

        Ok(response.json::<Option<DelegatedCredential>>().await?)
    }

    async fn get_session(
        &self,
        headers: &HeaderMap,
    ) -> Result<Option<Session>, AuthCollaboratorError> {
        let response = self
            .client
            .get(self.url(SESSION_PATH))
            .headers(session_headers(headers))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AuthCollaboratorError::Rejected(status.as_u16()));
        }

        Ok(response.json::<Option<Session>>().await?)
    }
}
