// --- File: crates/calpeek_gcal/src/error.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use calpeek_common::{
    models::{ErrorBody, ValidationIssue},
    HttpStatusCode,
};
use thiserror::Error;

use crate::service::FreeBusyError;

pub const BAD_REQUEST_MESSAGE: &str = "Invalid query parameters.";
pub const UNAUTHORIZED_MESSAGE: &str = "You must be signed in with Google to view availability.";

/// Failures of the availability endpoint, one variant per wire error kind.
#[derive(Error, Debug)]
pub enum AvailabilityError {
    /// Query input rejected before any network call.
    #[error("invalid query parameters: {0:?}")]
    BadRequest(Vec<ValidationIssue>),
    /// No usable delegated credential for the caller.
    #[error("{0}")]
    Unauthorized(String),
    /// Google could not be queried or answered with a failure.
    #[error("Google API error (status {status})")]
    GoogleApi { status: u16, body: Option<String> },
}

impl AvailabilityError {
    pub fn unauthorized() -> Self {
        AvailabilityError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
    }

    /// The JSON body sent to the caller.
    pub fn body(&self) -> ErrorBody {
        match self {
            AvailabilityError::BadRequest(issues) => ErrorBody::BadRequest {
                message: BAD_REQUEST_MESSAGE.to_string(),
                issues: issues.clone(),
            },
            AvailabilityError::Unauthorized(message) => ErrorBody::Unauthorized {
                message: message.clone(),
            },
            AvailabilityError::GoogleApi { status, body } => ErrorBody::GoogleApiError {
                status: *status,
                body: body.clone(),
            },
        }
    }
}

impl HttpStatusCode for AvailabilityError {
    fn status_code(&self) -> u16 {
        match self {
            AvailabilityError::BadRequest(_) => 400,
            AvailabilityError::Unauthorized(_) => 401,
            AvailabilityError::GoogleApi { .. } => 502,
        }
    }
}

impl From<FreeBusyError> for AvailabilityError {
    fn from(err: FreeBusyError) -> Self {
        match err {
            // No upstream status exists; report the gateway failure itself.
            FreeBusyError::Transport(e) => AvailabilityError::GoogleApi {
                status: StatusCode::BAD_GATEWAY.as_u16(),
                body: Some(e.to_string()),
            },
            FreeBusyError::Status { status, body } => AvailabilityError::GoogleApi { status, body },
            FreeBusyError::Parse { status, body, .. } => AvailabilityError::GoogleApi {
                status,
                body: Some(body).filter(|b| !b.is_empty()),
            },
        }
    }
}

impl IntoResponse for AvailabilityError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body())).into_response()
    }
}
