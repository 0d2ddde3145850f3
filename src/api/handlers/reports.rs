//! Report download and export endpoints

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::DashboardState;
use crate::api::envelope::{ApiError, Envelope};
use crate::report::{render_face_report, report_file_name, write_report};

/// Render the report for the session's current face design.
async fn render_current(state: &DashboardState, now: DateTime<Utc>) -> Result<String, ApiError> {
    let app_state = state.app_state.read().await;
    let result = app_state.face_inputs.compute()?;
    Ok(render_face_report(
        &state.config.site,
        &app_state.face_inputs,
        &result,
        app_state.face_analysis.as_deref(),
        state.advisor.language(),
        now,
    ))
}

/// GET /api/v1/report - Plain-text report as a file download
pub async fn download_report(State(state): State<DashboardState>) -> Result<Response, ApiError> {
    let now = Utc::now();
    let body = render_current(&state, now).await?;
    let disposition = format!("attachment; filename=\"{}\"", report_file_name(now));
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub path: String,
}

/// POST /api/v1/report - Write the report into the configured output directory
pub async fn export_report(
    State(state): State<DashboardState>,
) -> Result<Envelope<ExportResponse>, ApiError> {
    let now = Utc::now();
    let body = render_current(&state, now).await?;
    let path = write_report(&state.config.report.output_dir, &body, now)?;
    Ok(Envelope::ok(ExportResponse {
        path: path.display().to_string(),
    }))
}
