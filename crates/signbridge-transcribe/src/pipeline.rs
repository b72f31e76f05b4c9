//! The per-request transcription pipeline.
//!
//! Stage order: stage upload → normalize to the canonical waveform →
//! recognize → sanitize. Any stage may fail; both scratch files are RAII
//! guards, so every exit path leaves the scratch directory empty.

use std::path::PathBuf;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use signbridge_settings::TranscribeSettings;

use crate::errors::Result;
use crate::recognize::recognize;
use crate::sanitize::sanitize_transcript;
use crate::staging::{StagedFile, extension_for_mime};
use crate::transcode::normalize;

/// Everything the pipeline needs to run, resolved once at startup.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Transcoder executable.
    pub transcoder_path: PathBuf,
    /// Recognition engine executable.
    pub recognizer_path: PathBuf,
    /// Recognition model file.
    pub model_path: PathBuf,
    /// Directory for per-request scratch files.
    pub scratch_dir: PathBuf,
    /// Timeout applied to each external process invocation.
    pub process_timeout: Duration,
}

impl PipelineConfig {
    /// Build a config from loaded settings.
    pub fn from_settings(settings: &TranscribeSettings) -> Self {
        Self {
            transcoder_path: settings.transcoder_path.clone(),
            recognizer_path: settings.recognizer_path.clone(),
            model_path: settings.model_path.clone(),
            scratch_dir: settings.scratch_dir.clone(),
            process_timeout: Duration::from_millis(settings.process_timeout_ms),
        }
    }
}

/// The speech-to-text pipeline.
///
/// Cheap to clone and share. Runs are independent: scratch names are
/// uuid-based and no state is carried between requests.
#[derive(Clone, Debug)]
pub struct TranscriptionPipeline {
    config: PipelineConfig,
}

impl TranscriptionPipeline {
    /// Create a pipeline with the given config.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Transcribe one uploaded payload.
    ///
    /// `content_type` is the declared MIME type of the upload, used only to
    /// pick the staging extension; the transcoder sniffs the real format.
    #[instrument(skip_all, fields(bytes = payload.len()))]
    pub async fn transcribe(
        &self,
        payload: &[u8],
        content_type: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let ext = extension_for_mime(content_type);
        let input = StagedFile::create(&self.config.scratch_dir, ext, payload)?;
        let waveform = StagedFile::allocate(&self.config.scratch_dir, "wav")?;

        normalize(
            &self.config.transcoder_path,
            &input,
            &waveform,
            self.config.process_timeout,
            cancel,
        )
        .await?;
        debug!(waveform = %waveform.path().display(), "waveform ready");

        let raw = recognize(
            &self.config.recognizer_path,
            &self.config.model_path,
            waveform.path(),
            self.config.process_timeout,
            cancel,
        )
        .await?;

        let transcript = sanitize_transcript(&raw);
        info!(chars = transcript.len(), "transcription complete");
        Ok(transcript)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
