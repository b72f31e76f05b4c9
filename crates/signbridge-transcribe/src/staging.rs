//! RAII staging of scratch files.
//!
//! Each pipeline run stages the upload and reserves a waveform path as
//! [`StagedFile`] guards, so every exit path (success, error, cancellation)
//! leaves the scratch directory empty.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::{PipelineError, Result};

/// A scratch file that removes itself when dropped.
///
/// Names are `<uuid-v7>.<ext>`, so concurrent pipeline runs never touch
/// each other's files.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    /// Write `payload` to a fresh uniquely named file under `dir`.
    ///
    /// Returns [`PipelineError::EmptyPayload`] on a zero-length payload,
    /// before any filesystem side effect.
    pub fn create(dir: &Path, extension: &str, payload: &[u8]) -> Result<Self> {
        if payload.is_empty() {
            return Err(PipelineError::EmptyPayload);
        }
        std::fs::create_dir_all(dir)?;
        let path = dir.join(unique_name(extension));
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        // Guard first: a failed write still removes the partial file.
        let staged = Self { path };
        file.write_all(payload)?;
        debug!(path = %staged.path.display(), bytes = payload.len(), "staged payload");
        Ok(staged)
    }

    /// Reserve a unique path under `dir` without creating the file.
    ///
    /// Used for the transcoder output. The guard removes the file if the
    /// transcoder created it; a path that was never written is not an error.
    pub fn allocate(dir: &Path, extension: &str) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(unique_name(extension)),
        })
    }

    /// Path of the staged file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the file in bytes, 0 when it does not exist.
    pub fn size(&self) -> u64 {
        std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "failed to remove scratch file");
            }
        }
    }
}

fn unique_name(extension: &str) -> String {
    format!("{}.{extension}", Uuid::now_v7())
}

/// Map a declared MIME type to the staging file extension.
///
/// Parameters after `;` are ignored. Unknown or missing types default to
/// `webm`, the capture format browser recorders most commonly send; the
/// transcoder sniffs the actual content.
pub fn extension_for_mime(mime: Option<&str>) -> &'static str {
    let Some(mime) = mime else { return "webm" };
    let essence = mime.split(';').next().unwrap_or(mime).trim();
    match essence {
        "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/mp4" | "audio/m4a" | "audio/x-m4a" | "audio/aac" => "m4a",
        "audio/ogg" | "application/ogg" | "audio/vorbis" => "ogg",
        "audio/flac" | "audio/x-flac" => "flac",
        _ => "webm",
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
