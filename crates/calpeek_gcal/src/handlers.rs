// File: crates/calpeek_gcal/src/handlers.rs
use crate::auth::{AuthCollaborator, RemoteAuthCollaborator, GOOGLE_PROVIDER_ID};
use crate::error::AvailabilityError;
use crate::logic::{validate_days, AvailabilityQuery, Clock, LookAheadWindow, SystemClock};
use crate::service::{FreeBusyApi, GoogleFreeBusyClient};
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Json, Response},
};
use calpeek_common::{
    config_error, create_client,
    models::{AvailabilityResult, SessionResponse, PRIMARY_CALENDAR_ID},
    CalpeekError,
};
use calpeek_config::AppConfig;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared state of the GCal handlers.
///
/// Every collaborator is constructed up front and injected, so handlers hold
/// no hidden global state and tests can swap in fakes.
#[derive(Clone)]
pub struct GcalState {
    pub auth: Arc<dyn AuthCollaborator>,
    pub freebusy: Arc<dyn FreeBusyApi>,
    pub clock: Arc<dyn Clock>,
}

impl GcalState {
    pub fn new(auth: Arc<dyn AuthCollaborator>, freebusy: Arc<dyn FreeBusyApi>) -> Self {
        Self {
            auth,
            freebusy,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Builds the HTTP-backed collaborators from the `[auth]` and `[gcal]` sections.
    pub fn from_config(config: &AppConfig) -> Result<Self, CalpeekError> {
        let auth_config = config
            .auth
            .as_ref()
            .ok_or_else(|| config_error("auth configuration missing"))?;
        let gcal_config = config
            .gcal
            .as_ref()
            .ok_or_else(|| config_error("gcal configuration missing"))?;

        if !gcal_config.grants_freebusy() {
            warn!("Configured Google scopes do not include calendar.freebusy");
        }

        let auth = RemoteAuthCollaborator::new(create_client(None, false)?, &auth_config.base_url);
        let freebusy = GoogleFreeBusyClient::new(
            create_client(gcal_config.request_timeout_secs, true)?,
            &gcal_config.freebusy_url,
        );

        Ok(Self::new(Arc::new(auth), Arc::new(freebusy)))
    }
}

/// Handler returning the caller's busy intervals for the next `days` days.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/google/freebusy", // Path relative to /api
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Busy intervals of the primary calendar", body = AvailabilityResult),
        (status = 400, description = "Invalid days parameter", body = calpeek_common::models::ErrorBody),
        (status = 401, description = "Not signed in with Google", body = calpeek_common::models::ErrorBody),
        (status = 502, description = "Google API failure", body = calpeek_common::models::ErrorBody)
    ),
    tag = "GCal"
))]
pub async fn get_freebusy_handler(
    State(state): State<Arc<GcalState>>,
    Query(pairs): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Result<Response, AvailabilityError> {
    let query = AvailabilityQuery::from_pairs(pairs);
    let days = validate_days(query.days.as_deref()).map_err(|issues| {
        info!("Rejected days={:?}: {} issue(s)", query.days, issues.len());
        AvailabilityError::BadRequest(issues)
    })?;

    let credential = match state
        .auth
        .get_access_token(GOOGLE_PROVIDER_ID, &headers)
        .await
    {
        Ok(credential) => credential,
        Err(e) => {
            warn!("Auth collaborator failed: {}", e);
            None
        }
    };
    let access_token = credential
        .as_ref()
        .and_then(|c| c.usable_token())
        .ok_or_else(|| {
            debug!("No usable Google access token for caller");
            AvailabilityError::unauthorized()
        })?;

    let window = LookAheadWindow::starting_at(state.clock.now(), days);

    let busy = state
        .freebusy
        .query(access_token, &window, PRIMARY_CALENDAR_ID)
        .await
        .map_err(|e| {
            warn!("Error fetching GCal free/busy: {}", e);
            AvailabilityError::from(e)
        })?;

    let result = AvailabilityResult {
        calendar_id: PRIMARY_CALENDAR_ID.to_string(),
        time_min: window.time_min,
        time_max: window.time_max,
        busy,
    };

    // Time-sensitive, never cache.
    Ok(([(header::CACHE_CONTROL, "no-store")], Json(result)).into_response())
}

/// Handler exposing the caller's session for the sign-in panel.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/session",
    responses(
        (status = 200, description = "Current session, null when signed out", body = SessionResponse),
        (status = 502, description = "Auth service failure")
    ),
    tag = "GCal"
))]
pub async fn get_session_handler(
    State(state): State<Arc<GcalState>>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, CalpeekError> {
    let session = state.auth.get_session(&headers).await?;
    Ok(Json(SessionResponse { session }))
}
