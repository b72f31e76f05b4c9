//! Transcription pipeline settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for the audio transcription pipeline.
///
/// The transcoder and recognizer are external executables. Paths may be
/// absolute, relative to the working directory, or bare names resolved
/// against `PATH` at startup validation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranscribeSettings {
    /// Transcoder executable (ffmpeg or compatible).
    pub transcoder_path: PathBuf,
    /// Recognition engine executable (whisper-cli or compatible).
    pub recognizer_path: PathBuf,
    /// Recognition model file passed to the engine.
    pub model_path: PathBuf,
    /// Directory for per-request scratch files.
    pub scratch_dir: PathBuf,
    /// Timeout for each external process invocation in milliseconds.
    pub process_timeout_ms: u64,
}

impl Default for TranscribeSettings {
    fn default() -> Self {
        Self {
            transcoder_path: PathBuf::from("ffmpeg"),
            recognizer_path: PathBuf::from("whisper.cpp/build/bin/whisper-cli"),
            model_path: PathBuf::from("whisper.cpp/models/ggml-base.en.bin"),
            scratch_dir: std::env::temp_dir().join("signbridge-audio"),
            process_timeout_ms: 180_000,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcribe_defaults() {
        let t = TranscribeSettings::default();
        assert_eq!(t.transcoder_path, PathBuf::from("ffmpeg"));
        assert_eq!(
            t.recognizer_path,
            PathBuf::from("whisper.cpp/build/bin/whisper-cli")
        );
        assert_eq!(
            t.model_path,
            PathBuf::from("whisper.cpp/models/ggml-base.en.bin")
        );
        assert!(t.scratch_dir.ends_with("signbridge-audio"));
        assert_eq!(t.process_timeout_ms, 180_000);
    }

    #[test]
    fn transcribe_serde_camel_case() {
        let t = TranscribeSettings::default();
        let json = serde_json::to_value(&t).unwrap();
        assert!(json.get("transcoderPath").is_some());
        assert!(json.get("recognizerPath").is_some());
        assert!(json.get("modelPath").is_some());
        assert!(json.get("scratchDir").is_some());
        assert!(json.get("processTimeoutMs").is_some());
    }

    #[test]
    fn transcribe_partial_json() {
        let json = serde_json::json!({ "transcoderPath": "/opt/ffmpeg/bin/ffmpeg" });
        let t: TranscribeSettings = serde_json::from_value(json).unwrap();
        assert_eq!(t.transcoder_path, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        // Other fields should be defaults
        assert_eq!(t.process_timeout_ms, 180_000);
    }
}
