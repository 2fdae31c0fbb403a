// --- File: crates/calpeek_gcal/src/service.rs ---
//! Google Calendar Free/Busy client.
//!
//! One POST per lookup, no retries. Non-success responses are reported with
//! their status and raw body so the endpoint can pass them through.

use async_trait::async_trait;
use calpeek_common::models::{iso_millis, BusyInterval};
use chrono::{DateTime, Utc};
use reqwest::{header::ACCEPT, Client};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::logic::LookAheadWindow;

/// Errors that can occur when querying Free/Busy.
#[derive(Error, Debug)]
pub enum FreeBusyError {
    /// The request never produced a response (connect, DNS, timeout, body read).
    #[error("Free/Busy request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Google answered with a non-success status.
    #[error("Google API returned status {status}")]
    Status { status: u16, body: Option<String> },
    /// Google answered 2xx with a body that is not a Free/Busy response.
    #[error("Failed to parse Free/Busy response: {message}")]
    Parse {
        status: u16,
        body: String,
        message: String,
    },
}

// --- Wire format of the Free/Busy API ---

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct FreeBusyRequest<'a> {
    #[serde(with = "iso_millis")]
    time_min: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    time_max: DateTime<Utc>,
    items: Vec<FreeBusyRequestItem<'a>>,
}

#[derive(Serialize, Debug)]
struct FreeBusyRequestItem<'a> {
    id: &'a str,
}

#[derive(Deserialize, Debug, Default)]
pub struct FreeBusyResponse {
    #[serde(default)]
    pub calendars: HashMap<String, FreeBusyCalendar>,
}

#[derive(Deserialize, Debug, Default)]
pub struct FreeBusyCalendar {
    #[serde(default)]
    pub busy: Option<Vec<BusyInterval>>,
    #[serde(default)]
    pub errors: Option<Vec<FreeBusyCalendarError>>,
}

#[derive(Deserialize, Debug)]
pub struct FreeBusyCalendarError {
    pub domain: Option<String>,
    pub reason: Option<String>,
}

/// Takes the busy list of `calendar_id` out of a Free/Busy response.
///
/// A missing calendar, a missing `busy` list and a calendar that only carries
/// `errors` all yield an empty list. That makes "provider reported an error"
/// look like "no busy time"; the errors are logged so the two can still be told
/// apart in the logs.
pub fn extract_busy(mut response: FreeBusyResponse, calendar_id: &str) -> Vec<BusyInterval> {
    let Some(calendar) = response.calendars.remove(calendar_id) else {
        debug!("Free/Busy response has no entry for calendar {}", calendar_id);
        return Vec::new();
    };

    if let Some(errors) = calendar.errors.as_ref().filter(|e| !e.is_empty()) {
        let reasons: Vec<&str> = errors
            .iter()
            .map(|e| e.reason.as_deref().or(e.domain.as_deref()).unwrap_or("unknown"))
            .collect();
        warn!(
            "Free/Busy reported errors for calendar {}: {:?}",
            calendar_id, reasons
        );
    }

    calendar.busy.unwrap_or_default()
}

/// Busy-interval lookup against a calendar provider.
#[async_trait]
pub trait FreeBusyApi: Send + Sync {
    async fn query(
        &self,
        access_token: &str,
        window: &LookAheadWindow,
        calendar_id: &str,
    ) -> Result<Vec<BusyInterval>, FreeBusyError>;
}

/// Google Calendar implementation of [`FreeBusyApi`].
#[derive(Debug, Clone)]
pub struct GoogleFreeBusyClient {
    client: Client,
    url: String,
}

impl GoogleFreeBusyClient {
    /// Create a client posting to `url` (normally the public Free/Busy endpoint).
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl FreeBusyApi for GoogleFreeBusyClient {
    async fn query(
        &self,
        access_token: &str,
        window: &LookAheadWindow,
        calendar_id: &str,
    ) -> Result<Vec<BusyInterval>, FreeBusyError> {
        let request = FreeBusyRequest {
            time_min: window.time_min,
            time_max: window.time_max,
            items: vec![FreeBusyRequestItem { id: calendar_id }],
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(access_token)
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Best effort: an unreadable body is dropped, not reported.
            let body = response.text().await.ok().filter(|text| !text.is_empty());
            return Err(FreeBusyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let parsed: FreeBusyResponse =
            serde_json::from_str(&text).map_err(|err| FreeBusyError::Parse {
                status: status.as_u16(),
                body: text.clone(),
                message: err.to_string(),
            })?;

        let busy = extract_busy(parsed, calendar_id);
        debug!(
            "Free/Busy returned {} busy intervals for {}",
            busy.len(),
            calendar_id
        );
        Ok(busy)
    }
}
