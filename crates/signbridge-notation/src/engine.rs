//! ONNX sign-notation inference engine.
//!
//! Holds one ONNX Runtime session behind a mutex, built once at startup
//! and reused for every request. Session creation and inference are
//! blocking, so both run on the tokio blocking pool.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::errors::{NotationError, Result};

/// Sign-notation inference engine over a locally loaded ONNX session.
///
/// Construction never fails; a missing or broken model file leaves the
/// engine unloaded and every translation failing with
/// [`NotationError::ModelNotLoaded`].
pub struct NotationEngine {
    session: parking_lot::Mutex<Option<ort::session::Session>>,
    ready: AtomicBool,
}

impl Default for NotationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NotationEngine {
    /// Create an engine with no model loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: parking_lot::Mutex::new(None),
            ready: AtomicBool::new(false),
        }
    }

    /// Build the ONNX session from `model_path`.
    ///
    /// On failure the engine stays unloaded; the caller decides whether
    /// that is fatal (the binary logs a warning and keeps serving).
    pub async fn load(&self, model_path: &Path) -> Result<()> {
        let path = model_path.to_path_buf();

        let session = tokio::task::spawn_blocking(move || -> Result<ort::session::Session> {
            info!(model = %path.display(), "loading sign-notation model");

            let session = ort::session::Session::builder()
                .map_err(|e| NotationError::ModelInit(format!("session builder: {e}")))?
                .with_intra_threads(1)
                .map_err(|e| NotationError::ModelInit(format!("thread config: {e}")))?
                .with_log_level(ort::logging::LogLevel::Warning)
                .map_err(|e| NotationError::ModelInit(format!("log level: {e}")))?
                .commit_from_file(&path)
                .map_err(|e| NotationError::ModelInit(format!("model load: {e}")))?;

            Ok(session)
        })
        .await
        .map_err(|e| NotationError::ModelInit(format!("join error: {e}")))??;

        *self.session.lock() = Some(session);
        self.ready.store(true, Ordering::SeqCst);

        info!("sign-notation engine ready");
        Ok(())
    }

    /// Whether a model session is loaded.
    pub fn is_loaded(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Translate `text` into sign-notation token IDs.
    ///
    /// Takes the engine by `Arc` so the session can move onto the
    /// blocking pool for the duration of the run.
    pub async fn translate(self: Arc<Self>, text: &str) -> Result<Vec<i64>> {
        if !self.is_loaded() {
            return Err(NotationError::ModelNotLoaded);
        }

        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            let mut guard = self.session.lock();
            let session = guard.as_mut().ok_or(NotationError::ModelNotLoaded)?;
            run_inference(session, &text)
        })
        .await
        .map_err(|e| NotationError::Inference(format!("join error: {e}")))?
    }
}

/// Run the session and collect the output token IDs.
fn run_inference(session: &mut ort::session::Session, _text: &str) -> Result<Vec<i64>> {
    // TODO: encode `_text` with the model's tokenizer once the SignWriting
    // vocabulary file ships alongside the model; until then the published
    // model stub takes a single placeholder token.
    let input_tensor = ort::value::Tensor::from_array(([1i64], vec![1i64]))
        .map_err(|e| NotationError::Inference(format!("input tensor: {e}")))?;

    let outputs = session
        .run(ort::inputs![input_tensor])
        .map_err(|e| NotationError::Inference(format!("inference: {e}")))?;

    let (_, tokens) = outputs[0]
        .try_extract_tensor::<i64>()
        .map_err(|e| NotationError::BadOutput(format!("extract tensor: {e}")))?;

    Ok(tokens.to_vec())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use assert_matches::assert_matches;

    #[tokio::test]
    async fn translate_without_model_is_not_loaded() {
        let engine = Arc::new(NotationEngine::new());
        assert!(!engine.is_loaded());

        let result = Arc::clone(&engine).translate("My name is John.").await;
        assert_matches!(result, Err(NotationError::ModelNotLoaded));
    }

    #[tokio::test]
    async fn load_missing_file_fails_and_stays_unloaded() {
        let engine = NotationEngine::new();
        let result = engine.load(Path::new("/nonexistent/signwriting.onnx")).await;

        assert_matches!(result, Err(NotationError::ModelInit(_)));
        assert!(!engine.is_loaded());
    }

    #[tokio::test]
    async fn load_rejects_non_model_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.onnx");
        std::fs::write(&path, b"definitely not protobuf").unwrap();

        let engine = NotationEngine::new();
        let result = engine.load(&path).await;

        assert_matches!(result, Err(NotationError::ModelInit(_)));
        assert!(!engine.is_loaded());
    }
}
