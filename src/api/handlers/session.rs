//! Shared session state endpoints

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::debug;

use super::DashboardState;
use crate::api::envelope::{ApiError, Envelope};
use crate::session::{Action, AppState};

#[derive(Debug, Serialize)]
pub struct SessionUpdate {
    /// `false` when the reducer ignored the action
    pub applied: bool,
    pub state: AppState,
}

/// GET /api/v1/session
pub async fn get_session(State(state): State<DashboardState>) -> Envelope<AppState> {
    Envelope::ok(state.app_state.read().await.clone())
}

/// POST /api/v1/session/actions - Apply one action and return the new state
///
/// Advisory actions are server-raised and rejected here as `INVALID_PAYLOAD`.
pub async fn apply_action(
    State(state): State<DashboardState>,
    payload: Result<Json<Action>, JsonRejection>,
) -> Result<Envelope<SessionUpdate>, ApiError> {
    let Json(action) = payload?;
    let mut app_state = state.app_state.write().await;
    debug!(?action, "Applying session action");
    let applied = app_state.apply(action);
    Ok(Envelope::ok(SessionUpdate {
        applied,
        state: app_state.clone(),
    }))
}
