// File: crates/calpeek_gcal/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use calpeek_common::models::{
    AvailabilityResult, BusyInterval, ErrorBody, IssueCode, Session, SessionResponse,
    SessionUser, ValidationIssue,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::get_freebusy_handler,
        crate::handlers::get_session_handler
    ),
    components(schemas(
        AvailabilityResult,
        BusyInterval,
        ErrorBody,
        IssueCode,
        ValidationIssue,
        SessionResponse,
        Session,
        SessionUser
    )),
    tags((name = "GCal", description = "Google Calendar free/busy lookup"))
)]
pub struct GcalApiDoc;
