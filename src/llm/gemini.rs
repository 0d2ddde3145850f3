//! Gemini Backend: HTTP client for the Google generative language API
//!
//! `POST {base_url}/v1beta/models/{model}:generateContent`, key in the
//! `x-goog-api-key` header. Text parts of the first candidate are joined
//! into the reply.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::LlmBackend;
use crate::config::AdvisoryConfig;

/// Gemini client errors
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server returned status {status}: {body}")]
    ServerError {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Response contained no text candidates")]
    EmptyResponse,
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// HTTP client for the Gemini API
#[derive(Clone)]
pub struct GeminiBackend {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiBackend {
    /// Create a client from the advisory config and an API key.
    pub fn new(config: &AdvisoryConfig, api_key: &str) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.to_string(),
        })
    }

    /// Model identifier, for logging
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn generate_content(
        &self,
        system_instruction: Option<&str>,
        text: &str,
    ) -> Result<String, LlmError> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text }],
            }],
            system_instruction: system_instruction.map(|s| Content {
                role: None,
                parts: vec![Part { text: s }],
            }),
        };

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::ServerError { status, body });
        }

        let parsed: GenerateResponse = resp.json().await?;
        parsed.into_text().ok_or(LlmError::EmptyResponse)
    }
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(self.generate_content(None, prompt).await?)
    }

    async fn chat(&self, system_instruction: &str, message: &str) -> Result<String> {
        Ok(self
            .generate_content(Some(system_instruction), message)
            .await?)
    }

    fn backend_name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn backend_for(server: &MockServer) -> GeminiBackend {
        let config = AdvisoryConfig {
            base_url: server.base_url(),
            model: "gemini-test".to_string(),
            ..AdvisoryConfig::default()
        };
        GeminiBackend::new(&config, "test-key").unwrap()
    }

    fn candidate(parts: &[&str]) -> serde_json::Value {
        let parts: Vec<_> = parts.iter().map(|t| json!({ "text": t })).collect();
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": parts },
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn test_generate_sends_key_and_joins_parts() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1beta/models/gemini-test:generateContent")
                    .header("x-goog-api-key", "test-key")
                    .body_includes("Burden");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(candidate(&["1. Optimización", " técnica"]));
            })
            .await;

        let text = backend_for(&server).generate("Burden: 1m").await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "1. Optimización técnica");
    }

    #[tokio::test]
    async fn test_chat_sends_system_instruction() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1beta/models/gemini-test:generateContent")
                    .body_includes("systemInstruction")
                    .body_includes("SubMine AI");
                then.status(200).json_body(candidate(&["30 minutos"]));
            })
            .await;

        let reply = backend_for(&server)
            .chat("Eres SubMine AI", "¿Tiempo de ventilación?")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(reply, "30 minutos");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(403).body("API key not valid");
            })
            .await;

        let err = backend_for(&server)
            .generate_content(None, "hola")
            .await
            .unwrap_err();

        match err {
            LlmError::ServerError { status, body } => {
                assert_eq!(status.as_u16(), 403);
                assert!(body.contains("API key"));
            }
            other => panic!("expected ServerError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_candidates_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({ "candidates": [] }));
            })
            .await;

        let err = backend_for(&server)
            .generate_content(None, "hola")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let backend = GeminiBackend::new(&AdvisoryConfig::default(), "secret-key").unwrap();
        let dbg = format!("{backend:?}");
        assert!(!dbg.contains("secret-key"));
        assert!(dbg.contains("gemini-3-flash-preview"));
    }
}
