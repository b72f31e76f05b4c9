//! `POST /simplify_text`: plain-language rewriting via the chat upstream.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use signbridge_relay::RelayError;

use crate::error::ApiError;
use crate::server::AppState;

/// Request body: the text to simplify.
#[derive(Debug, Deserialize)]
pub struct SimplifyRequest {
    /// Source text, passed to the upstream model verbatim.
    pub text: String,
}

/// Response body with the rewritten text.
#[derive(Debug, Serialize)]
pub struct SimplifyResponse {
    /// The upstream model's plain-language rendition.
    pub simplified_text: String,
}

/// Forward the text to the chat upstream and return its first choice.
#[instrument(skip_all, fields(route = "/simplify_text"))]
pub async fn simplify_text(
    State(state): State<AppState>,
    Json(request): Json<SimplifyRequest>,
) -> Result<Json<SimplifyResponse>, ApiError> {
    let simplified_text = state
        .simplify
        .simplify(&request.text)
        .await
        .map_err(map_relay_error)?;

    Ok(Json(SimplifyResponse { simplified_text }))
}

/// Missing key is our misconfiguration (500), an unusable upstream body
/// is the upstream's fault (502), everything else means the upstream was
/// unreachable or unhappy (503).
fn map_relay_error(err: RelayError) -> ApiError {
    match err {
        RelayError::NotConfigured(_) => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Groq API key not configured.",
        ),
        RelayError::MalformedResponse(details) => ApiError::new(
            StatusCode::BAD_GATEWAY,
            format!("Groq API returned an unexpected response: {details}"),
        ),
        other => ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            format!("Groq API request failed: {other}"),
        ),
    }
}
