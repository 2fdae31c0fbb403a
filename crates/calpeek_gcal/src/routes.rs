// --- File: crates/calpeek_gcal/src/routes.rs ---

use crate::handlers::{get_freebusy_handler, get_session_handler, GcalState};
use axum::{routing::get, Router};
use std::sync::Arc;

/// Creates a router containing all routes for the Google Calendar feature.
/// Paths are relative to the `/api` prefix the backend nests them under.
pub fn routes(state: Arc<GcalState>) -> Router {
    Router::new()
        .route("/google/freebusy", get(get_freebusy_handler))
        .route("/session", get(get_session_handler))
        .with_state(state)
}
