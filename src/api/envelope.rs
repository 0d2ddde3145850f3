//! Response envelope shared by every `/api/v1` endpoint.
//!
//! Handlers return `Result<Envelope<T>, ApiError>`. Success serializes as
//! `{ "data": T, "meta": { ... } }`; every failure path, including a body
//! the JSON extractor rejects, serializes as
//! `{ "error": { "code", "message" }, "meta": { ... } }` with a code that
//! names the domain error.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error};

use crate::llm::RequestError;
use crate::physics_engine::EstimateError;
use crate::report::ReportError;
use crate::types::UnknownRockClass;

pub const API_VERSION: &str = "1";

#[derive(Debug, Serialize)]
pub struct Meta {
    pub timestamp: String,
    pub version: &'static str,
}

impl Meta {
    fn now() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            version: API_VERSION,
        }
    }
}

// ============================================================================
// Success
// ============================================================================

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub data: T,
    pub meta: Meta,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data,
            meta: Meta::now(),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Every way an `/api/v1` request can fail.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Estimate(#[from] EstimateError),

    #[error(transparent)]
    Analysis(#[from] RequestError),

    #[error(transparent)]
    RockClass(#[from] UnknownRockClass),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Payload(#[from] JsonRejection),

    #[error("chat message is empty")]
    EmptyMessage,

    #[error("no such endpoint")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Estimate(_) | Self::Analysis(_) | Self::RockClass(_) | Self::EmptyMessage => {
                StatusCode::BAD_REQUEST
            }
            Self::Payload(rejection) => rejection.status(),
            Self::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Stable machine-readable code for the `error.code` field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Estimate(e) => match e {
                EstimateError::NonFinite { .. } => "NON_FINITE_INPUT",
                EstimateError::DegenerateGrid { .. } => "DEGENERATE_GRID",
                EstimateError::ZeroHoleCount => "ZERO_HOLE_COUNT",
                EstimateError::ZeroHoleLength => "ZERO_HOLE_LENGTH",
                EstimateError::OutOfRange { .. } => "OUT_OF_RANGE",
            },
            Self::Analysis(e) => match e {
                RequestError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
                RequestError::NonFinitePattern(_) => "NON_FINITE_PATTERN",
                RequestError::EmptyPattern => "EMPTY_PATTERN",
            },
            Self::RockClass(_) => "UNKNOWN_ROCK_CLASS",
            Self::Report(_) => "REPORT_WRITE_FAILED",
            Self::Payload(_) => "INVALID_PAYLOAD",
            Self::EmptyMessage => "EMPTY_MESSAGE",
            Self::NotFound => "NOT_FOUND",
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
    meta: Meta,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.code(), error = %self, "Request failed");
        } else {
            debug!(code = self.code(), error = %self, "Request rejected");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code(),
                message: self.to_string(),
            },
            meta: Meta::now(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ok_response_shape() {
        let envelope = Envelope::ok(serde_json::json!({"hole_count": 15}));
        let resp = envelope.into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let v = body_json(resp).await;
        assert_eq!(v["meta"]["version"], "1");
        assert_eq!(v["data"]["hole_count"], 15);
    }

    #[tokio::test]
    async fn test_estimate_error_keeps_its_code() {
        let err = ApiError::from(EstimateError::DegenerateGrid {
            burden: 0.0,
            spacing: 1.1,
        });
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let v = body_json(resp).await;
        assert_eq!(v["error"]["code"], "DEGENERATE_GRID");
        assert!(v["error"]["message"].as_str().unwrap().contains("burden"));
        assert!(v["meta"]["timestamp"].is_string());
    }

    #[test]
    fn test_codes_per_source() {
        let zero_holes = ApiError::from(EstimateError::ZeroHoleCount);
        assert_eq!(zero_holes.code(), "ZERO_HOLE_COUNT");
        let empty = ApiError::from(RequestError::EmptyPattern);
        assert_eq!(empty.code(), "EMPTY_PATTERN");
        let rock = ApiError::from(UnknownRockClass("granito".to_string()));
        assert_eq!(rock.code(), "UNKNOWN_ROCK_CLASS");
        assert_eq!(rock.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_report_failure_is_server_error() {
        let err = ApiError::from(ReportError::Write(
            "/read-only/Reporte_SubMine_1.txt".into(),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "REPORT_WRITE_FAILED");
    }
}
