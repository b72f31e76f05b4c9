//! Notation error types.
//!
//! All notation errors are non-fatal for the service as a whole: the
//! endpoint degrades to an error response while the rest of the backend
//! keeps serving.

use thiserror::Error;

/// Errors from sign-notation inference.
#[derive(Debug, Error)]
pub enum NotationError {
    /// No model session is loaded (missing or broken model file).
    #[error("sign-notation model not loaded")]
    ModelNotLoaded,
    /// Building the ONNX session failed.
    #[error("model initialization failed: {0}")]
    ModelInit(String),
    /// Running the session failed.
    #[error("model inference failed: {0}")]
    Inference(String),
    /// The session ran but produced output of an unexpected type or shape.
    #[error("model produced unusable output: {0}")]
    BadOutput(String),
}

/// Result alias for notation operations.
pub type Result<T> = std::result::Result<T, NotationError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
