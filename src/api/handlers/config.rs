//! Effective configuration endpoint

use axum::extract::State;

use super::DashboardState;
use crate::api::envelope::Envelope;
use crate::config::SubmineConfig;

/// GET /api/v1/config - The configuration the server is running with
///
/// The API key lives only in the environment, so it cannot appear here.
pub async fn get_config(State(state): State<DashboardState>) -> Envelope<SubmineConfig> {
    Envelope::ok(SubmineConfig::clone(&state.config))
}
