// --- File: crates/calpeek_config/src/models.rs ---

use serde::{Deserialize, Serialize};

/// Minimal Google Calendar scope for availability-only access.
pub const FREEBUSY_SCOPE: &str = "https://www.googleapis.com/auth/calendar.freebusy";

pub const DEFAULT_FREEBUSY_URL: &str = "https://www.googleapis.com/calendar/v3/freeBusy";

/// Marker value replaced by an environment variable at load time.
pub const SECRET_FROM_ENV: &str = "secret_from_env";

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Minimum level for the calpeek crates (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

// --- Auth Collaborator Config ---
// The auth service owns sessions, the OAuth handshake and token refresh.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    /// Base URL of the auth service, e.g. "http://127.0.0.1:3000".
    pub base_url: String,
}

// --- Google Calendar Config ---
// Holds the OAuth client registration. Secrets loaded from env vars:
// GCAL_CLIENT_ID, GCAL_CLIENT_SECRET
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
    /// "offline" keeps Calendar API calls working after access token expiry.
    #[serde(default = "default_access_type")]
    pub access_type: String,
    #[serde(default = "default_freebusy_url")]
    pub freebusy_url: String,
    /// Unset means the outbound Free/Busy call waits indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl GcalConfig {
    /// True when both OAuth client credentials were resolved to real values.
    pub fn has_client_credentials(&self) -> bool {
        let resolved = |v: &str| !v.is_empty() && v != SECRET_FROM_ENV;
        resolved(&self.client_id) && resolved(&self.client_secret)
    }

    pub fn grants_freebusy(&self) -> bool {
        self.scopes.iter().any(|s| s == FREEBUSY_SCOPE)
    }
}

fn default_scopes() -> Vec<String> {
    vec![FREEBUSY_SCOPE.to_string()]
}

fn default_access_type() -> String {
    "offline".to_string()
}

fn default_freebusy_url() -> String {
    DEFAULT_FREEBUSY_URL.to_string()
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_gcal: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
}
