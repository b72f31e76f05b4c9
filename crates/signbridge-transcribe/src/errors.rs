//! Pipeline error types.

use thiserror::Error;

/// Errors from the audio transcription pipeline.
///
/// `TranscodeFailed` and `RecognitionFailed` carry the captured stderr of
/// the failing process so the HTTP layer can surface the diagnostic text.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The uploaded payload contained zero bytes.
    #[error("empty audio upload")]
    EmptyPayload,
    /// The transcoder exited non-zero.
    #[error("audio transcoding failed: {details}")]
    TranscodeFailed {
        /// Captured transcoder stderr.
        details: String,
    },
    /// The transcoder exited zero but produced no usable waveform.
    #[error("transcoder produced an invalid waveform ({size} bytes)")]
    InvalidAudioOutput {
        /// Size of the output file in bytes, 0 when it is missing.
        size: u64,
    },
    /// The recognition engine exited non-zero.
    #[error("speech recognition failed: {details}")]
    RecognitionFailed {
        /// Captured recognizer stderr.
        details: String,
    },
    /// An external process exceeded the configured timeout.
    #[error("{process} timed out after {timeout_ms} ms")]
    Timeout {
        /// Short name of the process that timed out.
        process: String,
        /// The elapsed timeout in milliseconds.
        timeout_ms: u64,
    },
    /// The request was cancelled before the pipeline finished.
    #[error("transcription cancelled")]
    Cancelled,
    /// Filesystem or spawn failure anywhere in the pipeline.
    #[error("audio pipeline i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
