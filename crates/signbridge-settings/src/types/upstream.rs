//! Collaborator upstream settings: text simplification, pose generation,
//! and the local sign-notation model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for the text simplification forwarder.
///
/// The upstream is an OpenAI-compatible chat-completions endpoint. The API
/// key is typically supplied via environment variable rather than the
/// settings file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimplifySettings {
    /// Chat-completions endpoint URL.
    pub api_url: String,
    /// Bearer token for the upstream API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model identifier sent with each request.
    pub model: String,
    /// Upstream request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for SimplifySettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            api_key: None,
            model: "llama3-70b-8192".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

/// Settings for the pose generation proxy.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PoseSettings {
    /// Pose generation endpoint URL.
    pub api_url: String,
    /// Upstream request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for PoseSettings {
    fn default() -> Self {
        Self {
            api_url: "https://us-central1-sign-mt.cloudfunctions.net/spoken_text_to_signed_pose"
                .to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

/// Settings for the sign-notation inference engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotationSettings {
    /// Path to the ONNX model file. A missing file disables the notation
    /// endpoint without affecting the rest of the service.
    pub model_path: PathBuf,
}

impl Default for NotationSettings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/signwriting.onnx"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
