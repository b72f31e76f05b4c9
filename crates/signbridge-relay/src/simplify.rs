//! Text simplification forwarder.
//!
//! Wraps an OpenAI-compatible chat-completions endpoint (Groq by default).
//! Each call sends a single user message asking the model to simplify the
//! given text and returns the content of the first choice.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use signbridge_settings::SimplifySettings;

use crate::errors::{RelayError, Result};

/// Instruction prepended to the caller's text in the chat message.
const PROMPT_PREFIX: &str = "Simplify this text: ";

// ─────────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// Client for the text simplification upstream.
///
/// Holds a reused [`reqwest::Client`] with the configured request timeout.
/// The API key is optional at construction; [`SimplifyClient::simplify`]
/// fails with [`RelayError::NotConfigured`] when it is absent.
#[derive(Clone)]
pub struct SimplifyClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl SimplifyClient {
    /// Create a client from settings.
    #[must_use]
    pub fn new(settings: &SimplifySettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .build()
            .unwrap_or_default();

        debug!(
            api_url = %settings.api_url,
            model = %settings.model,
            key_present = settings.api_key.is_some(),
            "simplify client initialized"
        );

        Self {
            client,
            api_url: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        }
    }

    /// Ask the upstream model to simplify `text`.
    ///
    /// Returns the content of the first completion choice. Fails with
    /// [`RelayError::NotConfigured`] when no API key is set, and with
    /// [`RelayError::MalformedResponse`] when the upstream replies 2xx
    /// but the body is not a chat completion with at least one choice.
    pub async fn simplify(&self, text: &str) -> Result<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(RelayError::NotConfigured("Groq API key"));
        };

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: format!("{PROMPT_PREFIX}{text}"),
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Upstream { status, body });
        }

        let payload = response.text().await?;
        let completion: ChatResponse = serde_json::from_str(&payload).map_err(|e| {
            RelayError::MalformedResponse(format!("invalid chat completion: {e}"))
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                RelayError::MalformedResponse("chat completion had no choices".to_string())
            })?;

        info!(chars_in = text.len(), chars_out = content.len(), "text simplified");
        Ok(content)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
