//! `POST /transcribe`: multipart audio upload in, transcript out.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::server::AppState;

/// Response body for a successful transcription.
#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    /// The sanitized transcript.
    pub text: String,
}

/// Pull the `audio` part out of the upload and run the pipeline on it.
///
/// The uploaded bytes never touch the filesystem here; staging under the
/// scratch directory is the pipeline's job.
#[instrument(skip_all, fields(route = "/transcribe"))]
pub async fn transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("audio") {
            // Grab the declared content type before `bytes()` consumes
            // the field.
            let content_type = field.content_type().map(str::to_string);
            let payload = field.bytes().await?;
            upload = Some((payload, content_type));
            break;
        }
    }

    let Some((payload, content_type)) = upload else {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "No audio file uploaded.",
        ));
    };

    debug!(
        bytes = payload.len(),
        content_type = content_type.as_deref().unwrap_or("unknown"),
        "audio upload received"
    );

    let cancel = state.shutdown.token();
    let text = state
        .pipeline
        .transcribe(&payload, content_type.as_deref(), &cancel)
        .await?;

    Ok(Json(TranscribeResponse { text }))
}
