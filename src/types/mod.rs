//! Shared value types: rock classes, face geometry, estimation results,
//! and form-input coercion.

pub mod estimate;
pub mod input;
pub mod rock;

pub use estimate::{CostBreakdown, OperationCostSummary, PatternResult};
pub use input::{coerce_count, coerce_f64, FieldValue};
pub use rock::{FaceGeometry, RockClass, RockCoefficients, UnknownRockClass};
