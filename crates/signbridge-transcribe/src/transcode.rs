//! Format normalization via the external transcoder.
//!
//! Browser uploads arrive in whatever container the recorder produced
//! (usually webm/opus). The recognition engine wants one thing only:
//! mono 16 kHz s16le PCM WAV. The transcoder bridges the two.

use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::errors::{PipelineError, Result};
use crate::exec::run_captured;
use crate::staging::StagedFile;

/// Minimum size of a usable WAV file: the 44-byte RIFF/WAVE header.
pub const MIN_WAV_BYTES: u64 = 44;

/// Sample rate of the canonical waveform.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Build the transcoder argument list for `input` → `output`.
///
/// `-vn` drops any video stream, `-ar 16000 -ac 1 -c:a pcm_s16le` pins the
/// canonical waveform format, `-y` overwrites the reserved output path.
pub fn transcode_args(input: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "-i".into(),
        input.into(),
        "-vn".into(),
        "-ar".into(),
        TARGET_SAMPLE_RATE.to_string().into(),
        "-ac".into(),
        "1".into(),
        "-c:a".into(),
        "pcm_s16le".into(),
        "-y".into(),
        output.into(),
    ]
}

/// Normalize staged audio into the canonical waveform.
///
/// Non-zero exit maps to [`PipelineError::TranscodeFailed`] carrying the
/// transcoder's stderr. A zero exit with a missing or sub-header-size output
/// maps to [`PipelineError::InvalidAudioOutput`].
pub async fn normalize(
    transcoder: &Path,
    input: &StagedFile,
    output: &StagedFile,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<()> {
    let args = transcode_args(input.path(), output.path());
    let result = run_captured(transcoder, &args, timeout, cancel).await?;
    debug!(exit_code = result.exit_code, "transcoder finished");

    if result.exit_code != 0 {
        return Err(PipelineError::TranscodeFailed {
            details: result.stderr,
        });
    }
    let size = output.size();
    if size < MIN_WAV_BYTES {
        return Err(PipelineError::InvalidAudioOutput { size });
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
