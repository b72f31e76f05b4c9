//! Startup validation of loaded settings.
//!
//! The pipeline depends on two external executables and a model file.
//! Validation runs once in `main`, before the server binds, so a
//! misconfigured deployment fails with a clear diagnostic instead of a
//! 500 on the first upload.

use std::ffi::OsStr;
use std::path::Path;

use crate::errors::{Result, SettingsError};
use crate::types::Settings;

impl Settings {
    /// Check that everything the pipeline needs actually exists.
    ///
    /// Verifies the transcoder and recognizer executables (bare names are
    /// resolved against `PATH`), the recognition model file, and that the
    /// scratch directory can be created. The notation model is not checked
    /// here; its absence only disables the notation endpoint.
    pub fn validate(&self) -> Result<()> {
        if self.server.max_upload_bytes == 0 {
            return Err(SettingsError::Validation(
                "server.maxUploadBytes must be greater than zero".to_string(),
            ));
        }

        let search_path = std::env::var_os("PATH");
        if !executable_exists(&self.transcribe.transcoder_path, search_path.as_deref()) {
            return Err(SettingsError::Validation(format!(
                "transcoder executable not found: {}",
                self.transcribe.transcoder_path.display()
            )));
        }
        if !executable_exists(&self.transcribe.recognizer_path, search_path.as_deref()) {
            return Err(SettingsError::Validation(format!(
                "recognizer executable not found: {}",
                self.transcribe.recognizer_path.display()
            )));
        }
        if !self.transcribe.model_path.is_file() {
            return Err(SettingsError::Validation(format!(
                "recognition model not found: {}",
                self.transcribe.model_path.display()
            )));
        }
        std::fs::create_dir_all(&self.transcribe.scratch_dir).map_err(|e| {
            SettingsError::Validation(format!(
                "scratch directory {} is not usable: {e}",
                self.transcribe.scratch_dir.display()
            ))
        })?;
        Ok(())
    }
}

/// Existence check for a configured executable.
///
/// Paths with a directory component are checked directly; bare names are
/// searched in `search_path`. Only existence is verified; a spawn failure
/// still surfaces at invocation time.
fn executable_exists(program: &Path, search_path: Option<&OsStr>) -> bool {
    if program.components().count() > 1 {
        return program.is_file();
    }
    let Some(search) = search_path else {
        return false;
    };
    std::env::split_paths(search).any(|dir| dir.join(program).is_file())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
