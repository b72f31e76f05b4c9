//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` for the JSON file
//! format. Each type implements [`Default`] with production default values.
//! Types marked with `#[serde(default)]` allow partial JSON — missing fields
//! get their default value during deserialization.

mod pipeline;
mod server;
mod upstream;

pub use pipeline::*;
pub use server::*;
pub use upstream::*;

use serde::{Deserialize, Serialize};

/// Root settings type for the signbridge backend.
///
/// Loaded from `~/.signbridge/settings.json` with defaults applied for
/// missing fields. Environment variables can override specific values.
///
/// # JSON Format
///
/// All field names are camelCase. Example:
///
/// ```json
/// {
///   "version": "0.1.0",
///   "name": "signbridge",
///   "server": { "port": 9000 },
///   "transcribe": { "transcoderPath": "/usr/bin/ffmpeg" }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Settings schema version.
    pub version: String,
    /// Application name.
    pub name: String,
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Audio transcription pipeline settings.
    pub transcribe: TranscribeSettings,
    /// Text simplification upstream settings.
    pub simplify: SimplifySettings,
    /// Pose generation upstream settings.
    pub pose: PoseSettings,
    /// Sign-notation inference settings.
    pub notation: NotationSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            name: "signbridge".to_string(),
            server: ServerSettings::default(),
            transcribe: TranscribeSettings::default(),
            simplify: SimplifySettings::default(),
            pose: PoseSettings::default(),
            notation: NotationSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
