// --- File: crates/calpeek_gcal/src/logic.rs ---
use calpeek_common::models::{IssueCode, ValidationIssue};
use chrono::{DateTime, Duration, SubsecRound, Utc};

/// Look-ahead used when the caller does not pass `days`.
pub const DEFAULT_DAYS: u32 = 7;
pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 30;

const DAYS_FIELD: &str = "days";

// --- Data Structures ---
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AvailabilityQuery {
    /// Number of days to look ahead, 1 to 30. Defaults to 7.
    #[cfg_attr(feature = "openapi", param(value_type = Option<u32>, example = 7))]
    pub days: Option<String>,
}

impl AvailabilityQuery {
    /// Picks `days` out of decoded query pairs. A repeated `days` keeps its
    /// first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            days: pairs
                .into_iter()
                .find(|(key, _)| key == DAYS_FIELD)
                .map(|(_, value)| value),
        }
    }
}

/// The `[time_min, time_max)` range busy intervals are requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookAheadWindow {
    pub time_min: DateTime<Utc>,
    pub time_max: DateTime<Utc>,
}

impl LookAheadWindow {
    /// Window of `days` whole days anchored at `now`.
    ///
    /// `now` is truncated to milliseconds first, the precision timestamps are
    /// serialized with, so `time_max - time_min` stays exact on the wire.
    pub fn starting_at(now: DateTime<Utc>, days: u32) -> Self {
        let time_min = now.trunc_subsecs(3);
        Self {
            time_min,
            time_max: time_min + Duration::days(i64::from(days)),
        }
    }
}

/// Source of the request receipt time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// --- Validation ---

/// Validates the raw `days` query value.
///
/// Absent means [`DEFAULT_DAYS`]. Present values are coerced to a number
/// (whitespace trimmed, `"5.0"` counts as 5) and must be a whole number in
/// `[MIN_DAYS, MAX_DAYS]`. Every failure produces exactly one issue.
pub fn validate_days(raw: Option<&str>) -> Result<u32, Vec<ValidationIssue>> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_DAYS);
    };

    let trimmed = raw.trim();
    let number = match trimmed.parse::<f64>() {
        Ok(n) if !trimmed.is_empty() && n.is_finite() => n,
        _ => {
            return Err(vec![issue(
                IssueCode::InvalidType,
                format!("Expected number, received '{raw}'"),
            )])
        }
    };

    if number.fract() != 0.0 {
        return Err(vec![issue(
            IssueCode::InvalidType,
            "Expected integer, received float".to_string(),
        )]);
    }
    if number < f64::from(MIN_DAYS) {
        return Err(vec![issue(
            IssueCode::TooSmall,
            format!("Number must be greater than or equal to {MIN_DAYS}"),
        )]);
    }
    if number > f64::from(MAX_DAYS) {
        return Err(vec![issue(
            IssueCode::TooBig,
            format!("Number must be less than or equal to {MAX_DAYS}"),
        )]);
    }

    // Range checked above, so the cast is lossless.
    Ok(number as u32)
}

fn issue(code: IssueCode, message: String) -> ValidationIssue {
    ValidationIssue {
        path: vec![DAYS_FIELD.to_string()],
        code,
        message,
    }
}
