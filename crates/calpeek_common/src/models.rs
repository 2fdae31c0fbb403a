// --- File: crates/calpeek_common/src/models.rs ---
//! Wire models of the availability API.
//!
//! Shared by the endpoint (which produces them) and the widget (which consumes
//! them), so both sides agree on field names and timestamp encoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The only calendar the availability endpoint looks at.
pub const PRIMARY_CALENDAR_ID: &str = "primary";

/// A busy time range exactly as the calendar provider reported it.
///
/// Both bounds are ISO-8601 instants. They are kept as the provider's strings so
/// the endpoint returns them unmodified; `start <= end` is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BusyInterval {
    #[cfg_attr(feature = "openapi", schema(example = "2024-01-02T10:00:00Z"))]
    pub start: String,
    #[cfg_attr(feature = "openapi", schema(example = "2024-01-02T11:00:00Z"))]
    pub end: String,
}

/// Successful response of `GET /api/google/freebusy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResult {
    #[cfg_attr(feature = "openapi", schema(example = "primary"))]
    pub calendar_id: String,
    #[serde(with = "iso_millis")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub time_min: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub time_max: DateTime<Utc>,
    pub busy: Vec<BusyInterval>,
}

/// Machine-readable code of a query validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    TooSmall,
    TooBig,
}

/// One problem found while validating query input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ValidationIssue {
    /// Path of the offending field, e.g. `["days"]`.
    pub path: Vec<String>,
    pub code: IssueCode,
    pub message: String,
}

/// Error bodies of the availability endpoint, tagged by `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "error", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorBody {
    BadRequest {
        message: String,
        issues: Vec<ValidationIssue>,
    },
    Unauthorized {
        message: String,
    },
    GoogleApiError {
        status: u16,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<String>,
    },
}

/// The user record inside a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Session {
    pub user: SessionUser,
}

/// Response of `GET /api/session`; `session` is null when signed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SessionResponse {
    pub session: Option<Session>,
}

/// UTC timestamps with millisecond precision, `2024-01-02T10:00:00.000Z`.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
