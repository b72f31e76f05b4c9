//! Pose generation forwarder.
//!
//! Proxies text to a cloud endpoint that renders spoken text as a binary
//! skeletal pose sequence. The upstream takes the text and the spoken and
//! signed language codes as query parameters and replies with the pose
//! file bytes directly; no decoding happens here.

use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, info};

use signbridge_settings::PoseSettings;

use crate::errors::{RelayError, Result};

/// Client for the pose generation upstream.
#[derive(Clone)]
pub struct PoseClient {
    client: reqwest::Client,
    api_url: String,
}

impl PoseClient {
    /// Create a client from settings.
    #[must_use]
    pub fn new(settings: &PoseSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .build()
            .unwrap_or_default();

        debug!(api_url = %settings.api_url, "pose client initialized");

        Self {
            client,
            api_url: settings.api_url.clone(),
        }
    }

    /// Fetch pose data for `text` in the given language pair.
    ///
    /// `spoken` is the spoken language code of the input (e.g. `en`) and
    /// `signed` the target sign language code (e.g. `ase`). Returns the
    /// raw pose bytes exactly as the upstream produced them.
    pub async fn generate(&self, text: &str, spoken: &str, signed: &str) -> Result<Bytes> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("text", text), ("spoken", spoken), ("signed", signed)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Upstream { status, body });
        }

        let data = response.bytes().await?;
        info!(bytes = data.len(), spoken, signed, "pose data fetched");
        Ok(data)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
