//! Stateless estimation endpoints
//!
//! Inputs arrive as numbers or raw form strings and are coerced the same
//! way the session reducer coerces them. Engine errors become 400s carrying
//! the error's own code.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::envelope::{ApiError, Envelope};
use crate::session::{BlastInputs, FaceInputs, OperationInputs};
use crate::types::{FieldValue, OperationCostSummary, PatternResult, RockClass};

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct FaceEstimateRequest {
    #[serde(default)]
    pub width: FieldValue,
    #[serde(default)]
    pub height: FieldValue,
    #[serde(default)]
    pub advance: FieldValue,
    /// English or Spanish label; Medium when omitted
    #[serde(default)]
    pub rock_class: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BlastEstimateRequest {
    #[serde(default)]
    pub spacing: FieldValue,
    #[serde(default)]
    pub burden: FieldValue,
    #[serde(default)]
    pub width: FieldValue,
    #[serde(default)]
    pub height: FieldValue,
    #[serde(default)]
    pub advance: FieldValue,
}

#[derive(Debug, Deserialize)]
pub struct OperationEstimateRequest {
    #[serde(default)]
    pub advance: FieldValue,
    #[serde(default)]
    pub hole_count: FieldValue,
    #[serde(default)]
    pub hole_length: FieldValue,
    #[serde(default)]
    pub unit_price: FieldValue,
}

/// Sanitised inputs echoed back alongside the result.
#[derive(Debug, Serialize)]
pub struct EstimateResponse<I: Serialize, R: Serialize> {
    pub inputs: I,
    pub result: R,
}

// ============================================================================
// Handlers
// ============================================================================

type EstimateResult<I, R> = Result<Envelope<EstimateResponse<I, R>>, ApiError>;

/// POST /api/v1/estimate/face
pub async fn estimate_face(
    payload: Result<Json<FaceEstimateRequest>, JsonRejection>,
) -> EstimateResult<FaceInputs, PatternResult> {
    let Json(req) = payload?;
    let rock_class = match req.rock_class.as_deref() {
        Some(label) => label.parse::<RockClass>()?,
        None => RockClass::default(),
    };
    let inputs = FaceInputs {
        width: req.width.as_f64(),
        height: req.height.as_f64(),
        advance: req.advance.as_f64(),
        rock_class,
    };
    let result = inputs.compute()?;
    Ok(Envelope::ok(EstimateResponse { inputs, result }))
}

/// POST /api/v1/estimate/blast
pub async fn estimate_blast(
    payload: Result<Json<BlastEstimateRequest>, JsonRejection>,
) -> EstimateResult<BlastInputs, PatternResult> {
    let Json(req) = payload?;
    let inputs = BlastInputs {
        spacing: req.spacing.as_f64(),
        burden: req.burden.as_f64(),
        width: req.width.as_f64(),
        height: req.height.as_f64(),
        advance: req.advance.as_f64(),
    };
    let result = inputs.compute()?;
    Ok(Envelope::ok(EstimateResponse { inputs, result }))
}

/// POST /api/v1/estimate/operation
pub async fn estimate_operation(
    payload: Result<Json<OperationEstimateRequest>, JsonRejection>,
) -> EstimateResult<OperationInputs, OperationCostSummary> {
    let Json(req) = payload?;
    let inputs = OperationInputs {
        advance: req.advance.as_f64(),
        hole_count: req.hole_count.as_count(),
        hole_length: req.hole_length.as_f64(),
        unit_price: req.unit_price.as_f64(),
    };
    let result = inputs.compute()?;
    Ok(Envelope::ok(EstimateResponse { inputs, result }))
}
