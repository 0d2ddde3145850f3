//! Estimation results returned by the physics engine.

use serde::{Deserialize, Serialize};

/// Consumable cost split for one blast round (currency units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub dynamite: f64,
    pub detonator: f64,
    pub cord: f64,
    pub total: f64,
}

impl CostBreakdown {
    /// Build a breakdown whose total is always the exact sum of its parts.
    pub fn from_parts(dynamite: f64, detonator: f64, cord: f64) -> Self {
        Self {
            dynamite,
            detonator,
            cord,
            total: dynamite + detonator + cord,
        }
    }
}

/// Drilling pattern derived for a face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternResult {
    pub spacing: f64,
    pub burden: f64,
    pub hole_count: u64,
    /// Explosive mass for the whole round (kg)
    pub total_explosive_mass: f64,
    pub costs: CostBreakdown,
}

/// Cost summary for the operation tab. Independent of [`PatternResult`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationCostSummary {
    /// Broken rock volume (m³), assuming the standard face section
    pub volume_estimate: f64,
    pub total_cost: f64,
    pub cost_per_hole: f64,
    pub cost_per_meter: f64,
}
