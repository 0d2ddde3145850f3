//! Empirical drilling & blasting models for underground development faces
//!
//! Closed-form estimates only:
//! - Face pattern from rock class (coefficient lookup + 1.3 safety factor)
//! - Manual blast pattern from caller-supplied burden/spacing (no safety factor)
//! - Operation cost summary from hole count, length and unit price
//!
//! All functions are pure. Degenerate input is reported as [`EstimateError`]
//! instead of leaking NaN or infinity to the caller.

use crate::config::defaults::{
    CHARGE_LENGTH_FRACTION, CORD_LENGTH_PER_HOLE, CORD_PRICE_PER_M, DETONATOR_PRICE,
    DYNAMITE_PRICE_PER_KG, FACE_SAFETY_FACTOR, MANUAL_CHARGE_DENSITY, STANDARD_FACE_AREA,
};
use crate::types::{CostBreakdown, FaceGeometry, OperationCostSummary, PatternResult, RockClass};

// ============================================================================
// Errors
// ============================================================================

/// Input for which no meaningful estimate exists.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("burden ({burden}) × spacing ({spacing}) must be greater than zero")]
    DegenerateGrid { burden: f64, spacing: f64 },

    #[error("hole count must be greater than zero to compute per-unit costs")]
    ZeroHoleCount,

    #[error("hole length must be greater than zero to compute cost per metre")]
    ZeroHoleLength,

    #[error("{quantity} is too large to represent for these inputs")]
    OutOfRange { quantity: &'static str },
}

fn finite(value: f64, field: &'static str) -> Result<f64, EstimateError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EstimateError::NonFinite { field })
    }
}

/// Finite, and clamped at zero: negative lengths give the degenerate zero result.
fn length(value: f64, field: &'static str) -> Result<f64, EstimateError> {
    finite(value, field).map(|v| v.max(0.0))
}

// ============================================================================
// Shared Pattern Math
// ============================================================================

/// Largest hole estimate that converts to `u64` exactly.
const MAX_HOLE_ESTIMATE: f64 = 9_007_199_254_740_992.0; // 2^53

/// Hole count for a face: `ceil(area / (burden × spacing) × factor)`.
fn hole_count(area: f64, burden: f64, spacing: f64, factor: f64) -> Result<u64, EstimateError> {
    let estimate = (area / (burden * spacing) * factor).ceil();
    if !estimate.is_finite() || estimate > MAX_HOLE_ESTIMATE {
        return Err(EstimateError::OutOfRange {
            quantity: "hole count",
        });
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let holes = estimate.max(0.0) as u64;
    Ok(holes)
}

/// Charge mass and consumable costs shared by both pattern variants.
#[allow(clippy::cast_precision_loss)]
fn charge_pattern(
    spacing: f64,
    burden: f64,
    holes: u64,
    advance: f64,
    charge_density: f64,
) -> Result<PatternResult, EstimateError> {
    let holes_f = holes as f64;
    let total_explosive_mass = holes_f * advance * CHARGE_LENGTH_FRACTION * charge_density;

    let costs = CostBreakdown::from_parts(
        total_explosive_mass * DYNAMITE_PRICE_PER_KG,
        holes_f * DETONATOR_PRICE,
        holes_f * CORD_LENGTH_PER_HOLE * CORD_PRICE_PER_M,
    );

    if !costs.total.is_finite() {
        return Err(EstimateError::OutOfRange {
            quantity: "explosive charge",
        });
    }

    Ok(PatternResult {
        spacing,
        burden,
        hole_count: holes,
        total_explosive_mass,
        costs,
    })
}

// ============================================================================
// Face Pattern
// ============================================================================

/// Drilling pattern for a face using the rock-class coefficients.
///
/// Formula:
/// - holes = ⌈W × H / (B × S) × 1.3⌉
/// - mass  = holes × advance × 0.8 × density
///
/// The 1.3 safety factor applies here only.
pub fn compute_face_pattern(
    width: f64,
    height: f64,
    advance: f64,
    rock_class: RockClass,
) -> Result<PatternResult, EstimateError> {
    let face = FaceGeometry::new(
        length(width, "width")?,
        length(height, "height")?,
        length(advance, "advance")?,
    );
    let c = rock_class.coefficients();

    let holes = hole_count(face.area(), c.burden, c.spacing, FACE_SAFETY_FACTOR)?;
    charge_pattern(c.spacing, c.burden, holes, face.advance, c.charge_density)
}

// ============================================================================
// Manual Blast Pattern
// ============================================================================

/// Blast pattern from operator-chosen burden and spacing.
///
/// Unlike the face pattern: no safety factor, and a fixed 1.5 kg/m charge
/// density whatever the rock.
pub fn compute_blast_pattern(
    spacing: f64,
    burden: f64,
    width: f64,
    height: f64,
    advance: f64,
) -> Result<PatternResult, EstimateError> {
    let spacing = finite(spacing, "spacing")?;
    let burden = finite(burden, "burden")?;
    let face = FaceGeometry::new(
        length(width, "width")?,
        length(height, "height")?,
        length(advance, "advance")?,
    );

    if burden * spacing <= 0.0 {
        return Err(EstimateError::DegenerateGrid { burden, spacing });
    }

    let holes = hole_count(face.area(), burden, spacing, 1.0)?;
    charge_pattern(spacing, burden, holes, face.advance, MANUAL_CHARGE_DENSITY)
}

// ============================================================================
// Operation Cost
// ============================================================================

/// Cost summary for a drilled round.
///
/// Volume assumes the standard 15 m² face because no geometry is supplied.
/// Per-hole and per-metre costs are undefined for zero holes or zero length.
#[allow(clippy::cast_precision_loss)]
pub fn compute_operation_cost(
    advance: f64,
    hole_count: u64,
    hole_length: f64,
    unit_price: f64,
) -> Result<OperationCostSummary, EstimateError> {
    let advance = finite(advance, "advance")?;
    let hole_length = finite(hole_length, "hole_length")?;
    let unit_price = finite(unit_price, "unit_price")?;

    if hole_count == 0 {
        return Err(EstimateError::ZeroHoleCount);
    }
    if hole_length == 0.0 {
        return Err(EstimateError::ZeroHoleLength);
    }

    let holes = hole_count as f64;
    let total_cost = holes * hole_length * unit_price;
    if !total_cost.is_finite() {
        return Err(EstimateError::OutOfRange {
            quantity: "total cost",
        });
    }

    Ok(OperationCostSummary {
        volume_estimate: advance * STANDARD_FACE_AREA,
        total_cost,
        cost_per_hole: total_cost / holes,
        cost_per_meter: total_cost / (holes * hole_length),
    })
}

// ============================================================================
// Tests
// ============================================================================
