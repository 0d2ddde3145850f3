//! SubMine: Underground Drilling & Blasting Calculator
//!
//! Estimates drilling patterns, explosive charge, and costs for an
//! underground heading, with an optional narrative advisory service.
//!
//! ## Architecture
//!
//! - **Physics Engine**: Pure face / blast / operation calculations
//! - **Session**: Presentation state mutated through a single reducer
//! - **LLM Module**: Narrative analysis and assistant chat over Gemini
//! - **Report**: Plain-text technical report export
//! - **API**: Axum HTTP surface over all of the above

pub mod api;
pub mod config;
pub mod llm;
pub mod physics_engine;
pub mod report;
pub mod session;
pub mod types;

// Re-export configuration
pub use config::SubmineConfig;

// Re-export commonly used types
pub use types::{
    CostBreakdown, FaceGeometry, FieldValue, OperationCostSummary, PatternResult, RockClass,
};

// Re-export engine entry points
pub use physics_engine::{
    compute_blast_pattern, compute_face_pattern, compute_operation_cost, EstimateError,
};

// Re-export advisory components
pub use llm::{AdvisoryService, AnalysisRequest, LlmBackend};

pub use session::{Action, AppState};
