//! Advisory Service: technical analysis and assistant chat
//!
//! Every failure is absorbed here: the caller always gets text back,
//! either the model's answer or a fixed apology in the configured language.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::{prompts, GeminiBackend, LlmBackend};
use crate::config::{AdvisoryConfig, Language};
use crate::types::{FaceGeometry, PatternResult, RockClass};

// ============================================================================
// Analysis Request
// ============================================================================

/// Reasons an analysis request is refused before any prompt is built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error("face {field} must be a positive finite number (got {value})")]
    InvalidGeometry { field: &'static str, value: f64 },
    #[error("pattern field {0} is not a finite number")]
    NonFinitePattern(&'static str),
    #[error("pattern has no holes; nothing to analyse")]
    EmptyPattern,
}

/// Typed input for the narrative analysis prompt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    geometry: FaceGeometry,
    rock_class: RockClass,
    pattern: PatternResult,
}

impl AnalysisRequest {
    /// Validate and build a request.
    pub fn new(
        geometry: FaceGeometry,
        rock_class: RockClass,
        pattern: PatternResult,
    ) -> Result<Self, RequestError> {
        for (field, value) in [
            ("width", geometry.width),
            ("height", geometry.height),
            ("advance", geometry.advance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RequestError::InvalidGeometry { field, value });
            }
        }

        for (field, value) in [
            ("spacing", pattern.spacing),
            ("burden", pattern.burden),
            ("total_explosive_mass", pattern.total_explosive_mass),
            ("costs.total", pattern.costs.total),
        ] {
            if !value.is_finite() {
                return Err(RequestError::NonFinitePattern(field));
            }
        }

        if pattern.hole_count == 0 {
            return Err(RequestError::EmptyPattern);
        }

        Ok(Self {
            geometry,
            rock_class,
            pattern,
        })
    }

    pub const fn geometry(&self) -> &FaceGeometry {
        &self.geometry
    }

    pub const fn rock_class(&self) -> RockClass {
        self.rock_class
    }

    pub const fn pattern(&self) -> &PatternResult {
        &self.pattern
    }

    /// Render the prompt for `language`.
    pub fn prompt(&self, language: Language) -> String {
        prompts::analysis_prompt(&self.geometry, self.rock_class, &self.pattern, language)
    }
}

// ============================================================================
// Advisory Service
// ============================================================================

/// Narrative analysis and chat over an optional backend.
///
/// Without a backend (no API key configured) every call returns the apology.
#[derive(Clone)]
pub struct AdvisoryService {
    backend: Option<Arc<dyn LlmBackend>>,
    language: Language,
}

impl AdvisoryService {
    pub fn new(backend: Option<Arc<dyn LlmBackend>>, language: Language) -> Self {
        Self { backend, language }
    }

    /// Service with no backend. Every call apologises.
    pub fn disabled(language: Language) -> Self {
        Self::new(None, language)
    }

    /// Build from config and an optional API key.
    pub fn from_config(config: &AdvisoryConfig, api_key: Option<&str>) -> Self {
        let Some(key) = api_key else {
            warn!(
                "No advisory API key found (GEMINI_API_KEY / API_KEY), narrative analysis disabled"
            );
            return Self::disabled(config.language);
        };

        match GeminiBackend::new(config, key) {
            Ok(backend) => {
                info!(model = %backend.model(), "Advisory backend ready");
                Self::new(Some(Arc::new(backend)), config.language)
            }
            Err(e) => {
                error!(
                    error = %e,
                    "Failed to build advisory HTTP client, narrative analysis disabled"
                );
                Self::disabled(config.language)
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub fn backend_name(&self) -> Option<&'static str> {
        self.backend.as_ref().map(|b| b.backend_name())
    }

    pub const fn language(&self) -> Language {
        self.language
    }

    /// Ask for a three-section technical analysis of a face design.
    pub async fn technical_analysis(&self, request: &AnalysisRequest) -> String {
        let apology = prompts::analysis_apology(self.language);
        let Some(backend) = &self.backend else {
            warn!("Technical analysis requested without an advisory backend");
            return apology.to_string();
        };

        let prompt = request.prompt(self.language);
        let start = Instant::now();
        match backend.generate(&prompt).await {
            Ok(text) => {
                info!(
                    backend = backend.backend_name(),
                    rock = %request.rock_class(),
                    holes = request.pattern().hole_count,
                    face_area = request.geometry().area(),
                    prompt_chars = prompt.len(),
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Technical analysis generated"
                );
                text
            }
            Err(e) => {
                error!(backend = backend.backend_name(), error = %e, "Error fetching analysis");
                apology.to_string()
            }
        }
    }

    /// Single-turn exchange with the assistant persona.
    ///
    /// Returns `None` for a blank message (nothing is sent).
    pub async fn chat(&self, message: &str) -> Option<String> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        let apology = prompts::chat_apology(self.language);
        let Some(backend) = &self.backend else {
            warn!("Chat requested without an advisory backend");
            return Some(apology.to_string());
        };

        let start = Instant::now();
        let reply = match backend
            .chat(prompts::assistant_persona(self.language), message)
            .await
        {
            Ok(text) => {
                info!(
                    backend = backend.backend_name(),
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Chat reply generated"
                );
                text
            }
            Err(e) => {
                error!(backend = backend.backend_name(), error = %e, "Chat error");
                apology.to_string()
            }
        };
        Some(reply)
    }
}

impl std::fmt::Debug for AdvisoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisoryService")
            .field("backend", &self.backend.as_ref().map(|b| b.backend_name()))
            .field("language", &self.language)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics_engine::compute_face_pattern;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Backend that records calls and replies with a canned result.
    struct ScriptedBackend {
        reply: Result<String, String>,
        calls: Mutex<Vec<(Option<String>, String)>>,
    }

    impl ScriptedBackend {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing(msg: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(msg.to_string()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn respond(&self) -> anyhow::Result<String> {
            self.reply.clone().map_err(|e| anyhow::anyhow!(e))
        }
    }

    #[async_trait]
    impl LlmBackend for ScriptedBackend {
        async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
            self.calls.lock().unwrap().push((None, prompt.to_string()));
            self.respond()
        }

        async fn chat(&self, system: &str, message: &str) -> anyhow::Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((Some(system.to_string()), message.to_string()));
            self.respond()
        }

        fn backend_name(&self) -> &'static str {
            "scripted"
        }
    }

    fn reference_request() -> AnalysisRequest {
        let geometry = FaceGeometry::new(3.5, 3.5, 3.0);
        let pattern = compute_face_pattern(3.5, 3.5, 3.0, RockClass::Medium).unwrap();
        AnalysisRequest::new(geometry, RockClass::Medium, pattern).unwrap()
    }

    #[tokio::test]
    async fn test_analysis_returns_backend_text() {
        let backend = ScriptedBackend::ok("1. Optimización Técnica ...");
        let service = AdvisoryService::new(Some(backend.clone()), Language::Es);

        let text = service.technical_analysis(&reference_request()).await;

        assert_eq!(text, "1. Optimización Técnica ...");
        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].1.contains("Nro Taladros: 15"));
    }

    #[tokio::test]
    async fn test_analysis_failure_returns_apology() {
        let backend = ScriptedBackend::failing("quota exceeded");
        let service = AdvisoryService::new(Some(backend), Language::Es);
        let text = service.technical_analysis(&reference_request()).await;
        assert_eq!(text, prompts::analysis_apology(Language::Es));
    }

    #[tokio::test]
    async fn test_chat_failure_returns_apology_in_language() {
        let service = AdvisoryService::new(Some(ScriptedBackend::failing("401")), Language::En);
        let reply = service.chat("How long to ventilate?").await;
        assert_eq!(reply.as_deref(), Some(prompts::chat_apology(Language::En)));
    }

    #[tokio::test]
    async fn test_chat_uses_persona_and_trims_message() {
        let backend = ScriptedBackend::ok("30 minutos mínimo.");
        let service = AdvisoryService::new(Some(backend.clone()), Language::Es);

        let reply = service.chat("  ¿Ventilación?  ").await;

        assert_eq!(reply.as_deref(), Some("30 minutos mínimo."));
        let calls = backend.calls.lock().unwrap();
        assert_eq!(
            calls[0].0.as_deref(),
            Some(prompts::assistant_persona(Language::Es))
        );
        assert_eq!(calls[0].1, "¿Ventilación?");
    }

    #[test]
    fn test_blank_chat_is_not_sent() {
        let backend = ScriptedBackend::ok("unused");
        let service = AdvisoryService::new(Some(backend.clone()), Language::Es);
        assert_eq!(tokio_test::block_on(service.chat("   ")), None);
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_disabled_service_apologises() {
        let service = AdvisoryService::from_config(&AdvisoryConfig::default(), None);
        assert!(!service.is_enabled());
        let text = tokio_test::block_on(service.technical_analysis(&reference_request()));
        assert_eq!(text, prompts::analysis_apology(Language::Es));
    }

    #[test]
    fn test_request_exposes_validated_parts() {
        let request = reference_request();
        assert_eq!(request.rock_class(), RockClass::Medium);
        assert_eq!(request.pattern().hole_count, 15);
        assert!((request.geometry().area() - 12.25).abs() < 1e-9);
    }

    #[test]
    fn test_request_rejects_bad_geometry() {
        let pattern = compute_face_pattern(3.5, 3.5, 3.0, RockClass::Medium).unwrap();
        let geometry = FaceGeometry::new(0.0, 3.5, 3.0);
        assert_eq!(
            AnalysisRequest::new(geometry, RockClass::Medium, pattern),
            Err(RequestError::InvalidGeometry {
                field: "width",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_request_rejects_non_finite_pattern() {
        let mut pattern = compute_face_pattern(3.5, 3.5, 3.0, RockClass::Medium).unwrap();
        pattern.costs.total = f64::NAN;
        let geometry = FaceGeometry::new(3.5, 3.5, 3.0);
        assert_eq!(
            AnalysisRequest::new(geometry, RockClass::Medium, pattern),
            Err(RequestError::NonFinitePattern("costs.total"))
        );
    }
}
