//! Liveness endpoint

use axum::extract::State;
use chrono::Utc;
use serde::Serialize;

use super::DashboardState;
use crate::api::envelope::Envelope;
use crate::config::Language;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub site: String,
    /// Backend name when an API key was configured
    pub advisory_backend: Option<&'static str>,
    pub language: Language,
    pub uptime_seconds: i64,
}

/// GET /api/v1/health
pub async fn get_health(State(state): State<DashboardState>) -> Envelope<HealthResponse> {
    Envelope::ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        site: state.config.site.name.clone(),
        advisory_backend: state.advisor.backend_name(),
        language: state.advisor.language(),
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
    })
}
