//! `POST /translate_signwriting`: text to sign-notation tokens.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ApiError;
use crate::server::AppState;

/// Request body: the text to translate.
#[derive(Debug, Deserialize)]
pub struct NotationRequest {
    /// Source text.
    pub text: String,
}

/// Response body carrying raw model output.
#[derive(Debug, Serialize)]
pub struct NotationResponse {
    /// Sign-notation token ids, exactly as the model emitted them.
    pub signwriting: Vec<i64>,
}

/// Run the notation model on the text.
///
/// Answers 500 with a clear detail when the model never loaded, so a
/// missing model file degrades this one route instead of the server.
#[instrument(skip_all, fields(route = "/translate_signwriting"))]
pub async fn translate_signwriting(
    State(state): State<AppState>,
    Json(request): Json<NotationRequest>,
) -> Result<Json<NotationResponse>, ApiError> {
    let signwriting = Arc::clone(&state.notation).translate(&request.text).await?;
    Ok(Json(NotationResponse { signwriting }))
}
