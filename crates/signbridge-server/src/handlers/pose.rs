//! `POST /generate_pose`: fetch skeletal pose data for a phrase.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use signbridge_relay::RelayError;

use crate::error::ApiError;
use crate::server::AppState;

/// Request body for pose generation.
#[derive(Debug, Deserialize)]
pub struct PoseRequest {
    /// Text to render as a pose sequence.
    pub text: String,
    /// Spoken language code of the input text.
    #[serde(default = "default_spoken_language")]
    pub spoken_language: String,
    /// Target sign language code.
    #[serde(default = "default_signed_language")]
    pub signed_language: String,
}

fn default_spoken_language() -> String {
    "en".to_string()
}

fn default_signed_language() -> String {
    "ase".to_string()
}

/// Response body carrying the upstream `.pose` bytes.
#[derive(Debug, Serialize)]
pub struct PoseResponse {
    /// Base64 encoding of the binary pose data, untouched otherwise.
    pub pose_data: String,
    /// Always `"binary_base64"`.
    pub data_format: &'static str,
}

/// Proxy the request to the pose upstream and base64 the reply, since
/// the raw `.pose` format does not survive a JSON body.
#[instrument(skip_all, fields(route = "/generate_pose"))]
pub async fn generate_pose(
    State(state): State<AppState>,
    Json(request): Json<PoseRequest>,
) -> Result<Json<PoseResponse>, ApiError> {
    let data = state
        .pose
        .generate(
            &request.text,
            &request.spoken_language,
            &request.signed_language,
        )
        .await
        .map_err(map_relay_error)?;

    Ok(Json(PoseResponse {
        pose_data: STANDARD.encode(&data),
        data_format: "binary_base64",
    }))
}

/// The pose upstream takes no credentials and returns raw bytes, so
/// every relay failure here means it was unreachable or unhappy.
fn map_relay_error(err: RelayError) -> ApiError {
    ApiError::new(
        StatusCode::SERVICE_UNAVAILABLE,
        format!("Pose generation failed: {err}"),
    )
}
