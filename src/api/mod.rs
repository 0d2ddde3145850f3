//! REST API module using Axum
//!
//! HTTP surface for the SubMine calculator: stateless estimates, the shared
//! session, narrative advisories, and report download, all under `/api/v1`.

pub mod envelope;
pub mod handlers;
mod routes;

pub use handlers::DashboardState;

use axum::http::{header, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build a CORS layer that is restrictive by default (same-origin only).
///
/// Set `SUBMINE_CORS_ORIGINS` to a comma-separated list of allowed origins
/// for a separately served front end (e.g. `http://localhost:5173`).
fn build_cors_layer() -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match std::env::var("SUBMINE_CORS_ORIGINS") {
        Ok(origins) => {
            let allowed: Vec<_> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            tracing::info!(origins = %origins, "CORS: allowing configured origins");
            base.allow_origin(allowed)
                .expose_headers([header::CONTENT_DISPOSITION])
        }
        Err(_) => base,
    }
}

/// Create the complete application router.
pub fn create_app(state: DashboardState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
}
