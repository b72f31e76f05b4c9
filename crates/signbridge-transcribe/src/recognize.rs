//! Recognition engine invocation.

use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::errors::{PipelineError, Result};
use crate::exec::run_captured;

/// Build the recognizer argument list.
///
/// `-otxt` asks the engine for plain-text output; the transcript itself
/// arrives on stdout.
pub fn recognize_args(model: &Path, waveform: &Path) -> Vec<OsString> {
    vec![
        "-m".into(),
        model.into(),
        "-f".into(),
        waveform.into(),
        "-otxt".into(),
    ]
}

/// Run the recognition engine over a normalized waveform.
///
/// Returns the raw engine stdout. Non-zero exit maps to
/// [`PipelineError::RecognitionFailed`] carrying the captured stderr.
pub async fn recognize(
    recognizer: &Path,
    model: &Path,
    waveform: &Path,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<String> {
    let args = recognize_args(model, waveform);
    let result = run_captured(recognizer, &args, timeout, cancel).await?;
    debug!(
        exit_code = result.exit_code,
        stdout_bytes = result.stdout.len(),
        "recognizer finished"
    );

    if result.exit_code != 0 {
        return Err(PipelineError::RecognitionFailed {
            details: result.stderr,
        });
    }
    Ok(result.stdout)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
