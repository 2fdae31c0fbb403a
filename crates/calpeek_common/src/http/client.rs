// --- File: crates/calpeek_common/src/http/client.rs ---
use reqwest::Client;
use std::time::Duration;

use crate::error::CalpeekError;

/// Builds an outbound HTTP client.
///
/// Clients are constructed once at startup and handed to the services that need
/// them, so connection pools are shared without process-global state.
///
/// # Arguments
///
/// * `timeout_secs` - Whole-request timeout; `None` leaves requests unbounded
/// * `follow_redirects` - Whether the client should follow redirects
pub fn create_client(
    timeout_secs: Option<u64>,
    follow_redirects: bool,
) -> Result<Client, CalpeekError> {
    let mut builder = Client::builder().redirect(if follow_redirects {
        reqwest::redirect::Policy::default()
    } else {
        reqwest::redirect::Policy::none()
    });
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}
