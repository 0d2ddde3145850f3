//! LLM Backend Module
//!
//! Narrative advisory support for face designs.
//!
//! ## Architecture
//!
//! - **LlmBackend**: async seam over a generative text provider
//! - **GeminiBackend**: Google Gemini REST implementation (reqwest)
//! - **AdvisoryService**: technical analysis + single-turn chat; converts
//!   every backend failure into a fixed apology string
//!
//! There is no retry, no cache, and no conversation memory: each call is
//! one outbound request.

use anyhow::Result;
use async_trait::async_trait;

pub mod advisory;
pub mod gemini;
pub mod prompts;

pub use advisory::{AdvisoryService, AnalysisRequest, RequestError};
pub use gemini::{GeminiBackend, LlmError};

/// Unified trait for LLM backends
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// One-shot completion for a fully assembled prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Single-turn exchange under a system instruction. No history is kept.
    async fn chat(&self, system_instruction: &str, message: &str) -> Result<String>;

    /// Get the backend name for logging
    fn backend_name(&self) -> &'static str;
}
