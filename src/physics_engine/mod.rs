//! Physics Engine Module
//!
//! Deterministic estimation for underground drilling & blasting design.
//! Pure functions only: no I/O, no configuration reads, no shared state,
//! so every function is safe to call concurrently from any request.
//!
//! - `compute_face_pattern()` - Pattern from rock class coefficients
//! - `compute_blast_pattern()` - Pattern from manual burden/spacing
//! - `compute_operation_cost()` - Per-hole and per-metre costs

pub mod blast_models;

pub use blast_models::{
    compute_blast_pattern, compute_face_pattern, compute_operation_cost, EstimateError,
};
