//! Narrative analysis and assistant chat endpoints
//!
//! The session lock is released before any advisory call is awaited.
//! Backend failures come back as the apology text with a 200.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::DashboardState;
use crate::api::envelope::{ApiError, Envelope};
use crate::llm::AnalysisRequest;
use crate::session::Action;

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis: String,
    /// `false` when the face inputs changed while the analysis was running
    pub stored: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    /// Transcript length after the answer was appended
    pub transcript_len: usize,
}

/// POST /api/v1/advisory/analysis - Analyse the session's current face design
pub async fn request_analysis(
    State(state): State<DashboardState>,
) -> Result<Envelope<AnalysisResponse>, ApiError> {
    let (inputs, request) = {
        let mut app_state = state.app_state.write().await;
        let inputs = app_state.face_inputs;
        let pattern = inputs.compute()?;
        let request = AnalysisRequest::new(inputs.geometry(), inputs.rock_class, pattern)?;
        app_state.apply(Action::AnalysisStarted);
        (inputs, request)
    };

    let analysis = state.advisor.technical_analysis(&request).await;

    let stored = state.app_state.write().await.apply(Action::AnalysisFinished {
        inputs,
        text: analysis.clone(),
    });
    if stored {
        info!(chars = analysis.len(), "Face analysis stored");
    } else {
        info!("Face inputs changed during analysis, result not stored");
    }
    Ok(Envelope::ok(AnalysisResponse { analysis, stored }))
}

/// POST /api/v1/advisory/chat - Single-turn exchange with the assistant
pub async fn send_chat(
    State(state): State<DashboardState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Envelope<ChatResponse>, ApiError> {
    let Json(req) = payload?;
    let message = req.message.trim().to_string();
    let accepted = state.app_state.write().await.apply(Action::ChatSent {
        text: message.clone(),
    });
    if !accepted {
        return Err(ApiError::EmptyMessage);
    }

    let reply = state
        .advisor
        .chat(&message)
        .await
        .ok_or(ApiError::EmptyMessage)?;

    let transcript_len = {
        let mut app_state = state.app_state.write().await;
        app_state.apply(Action::ChatAnswered {
            text: reply.clone(),
        });
        app_state.chat.len()
    };
    Ok(Envelope::ok(ChatResponse {
        reply,
        transcript_len,
    }))
}
