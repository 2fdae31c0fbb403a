// File: services/calpeek_backend/src/lib.rs
use axum::{routing::get, Router};
use calpeek_common::CalpeekError;
use calpeek_config::AppConfig;
#[cfg(feature = "gcal")]
use calpeek_gcal::{routes as gcal_routes, GcalState};
#[cfg(feature = "gcal")]
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub const WELCOME: &str = "Welcome to the calpeek API!";

/// Builds the application router: everything lives under `/api`.
pub fn build_app(config: &AppConfig) -> Result<Router, CalpeekError> {
    #[allow(unused_mut)] // for the features it needs to be mutable
    let mut api_router = Router::new().route("/", get(|| async { WELCOME }));

    if config.use_gcal {
        #[cfg(feature = "gcal")]
        {
            if let Some(gcal) = &config.gcal {
                if !gcal.has_client_credentials() {
                    warn!("Google client credentials are not set; sign-in with Google will fail");
                }
            }
            let state = GcalState::from_config(config)?;
            api_router = api_router.merge(gcal_routes(Arc::new(state)));
            info!("Availability routes enabled");
        }
        #[cfg(not(feature = "gcal"))]
        warn!("use_gcal is set but the binary was built without the gcal feature");
    } else {
        warn!("Availability routes disabled (use_gcal = false)");
    }

    #[allow(unused_mut)]
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        #[cfg(feature = "gcal")]
        use calpeek_gcal::doc::GcalApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "calpeek API",
                version = "0.1.0",
                description = "Read-only calendar availability",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        #[allow(unused_mut)]
        let mut openapi_doc = ApiDoc::openapi();
        #[cfg(feature = "gcal")]
        openapi_doc.merge(GcalApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");
        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    Ok(app.layer(TraceLayer::new_for_http()))
}
