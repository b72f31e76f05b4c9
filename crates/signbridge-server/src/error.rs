//! HTTP error responses.
//!
//! Every failure path in the handlers resolves to an [`ApiError`]: a
//! status code plus a diagnostic string serialized as `{"detail": ...}`,
//! the body shape the frontend already parses.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::warn;

use signbridge_notation::NotationError;
use signbridge_transcribe::PipelineError;

/// An HTTP error: status code plus client-facing detail text.
#[derive(Debug)]
pub struct ApiError {
    /// Status code for the response.
    pub status: StatusCode,
    /// Diagnostic sent to the client as `{"detail": ...}`.
    pub detail: String,
}

impl ApiError {
    /// Create an error with an explicit status and detail message.
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(status = %self.status, detail = %self.detail, "request failed");
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        // `status()` reports 413 when the failure came from the body
        // limit, 400 for anything else malformed.
        Self {
            status: err.status(),
            detail: err.body_text(),
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        let (status, detail) = match err {
            PipelineError::EmptyPayload => (
                StatusCode::BAD_REQUEST,
                "Empty audio file uploaded.".to_string(),
            ),
            PipelineError::TranscodeFailed { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Audio conversion failed: {details}"),
            ),
            PipelineError::InvalidAudioOutput { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to produce a valid audio file for transcription.".to_string(),
            ),
            PipelineError::RecognitionFailed { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Transcription failed: {details}"),
            ),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };
        Self { status, detail }
    }
}

impl From<NotationError> for ApiError {
    fn from(err: NotationError) -> Self {
        let detail = match err {
            NotationError::ModelNotLoaded => "ONNX model not loaded.".to_string(),
            NotationError::ModelInit(details)
            | NotationError::Inference(details)
            | NotationError::BadOutput(details) => {
                format!("Model inference failed: {details}")
            }
        };
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
