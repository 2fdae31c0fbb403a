// --- File: crates/calpeek_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Wire models shared by the endpoint and the widget


// Re-export error types and utilities for easier access
pub use error::{
    config_error, external_service_error, CalpeekError, Context, HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{client::create_client, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::{init_from_config, init_with_level};
