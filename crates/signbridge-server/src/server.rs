//! Server assembly: shared state, routes, middleware, serve loop.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use signbridge_notation::NotationEngine;
use signbridge_relay::{PoseClient, SimplifyClient};
use signbridge_settings::Settings;
use signbridge_transcribe::{PipelineConfig, TranscriptionPipeline};

use crate::handlers;
use crate::health::{HealthResponse, health_check};
use crate::shutdown::ShutdownCoordinator;

/// Shared state cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Effective settings, for handlers that need limits or paths.
    pub settings: Arc<Settings>,
    /// Transcoder plus recognizer pipeline.
    pub pipeline: TranscriptionPipeline,
    /// Client for the text simplification upstream.
    pub simplify: SimplifyClient,
    /// Client for the pose generation upstream.
    pub pose: PoseClient,
    /// Sign-notation inference engine.
    pub notation: Arc<NotationEngine>,
    /// Source of the shared cancellation token.
    pub shutdown: Arc<ShutdownCoordinator>,
    /// When the server came up, for uptime reporting.
    pub start_time: Instant,
}

/// The signbridge HTTP server.
pub struct SignbridgeServer {
    state: AppState,
}

impl SignbridgeServer {
    /// Build a server from settings and an already-constructed notation
    /// engine. The engine arrives separately because model loading is
    /// async and its failure is tolerated.
    pub fn new(settings: Settings, notation: Arc<NotationEngine>) -> Self {
        let pipeline = TranscriptionPipeline::new(PipelineConfig::from_settings(&settings.transcribe));
        let simplify = SimplifyClient::new(&settings.simplify);
        let pose = PoseClient::new(&settings.pose);

        Self {
            state: AppState {
                settings: Arc::new(settings),
                pipeline,
                simplify,
                pose,
                notation,
                shutdown: Arc::new(ShutdownCoordinator::new()),
                start_time: Instant::now(),
            },
        }
    }

    /// Effective settings.
    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    /// The shutdown coordinator shared with in-flight requests.
    pub fn shutdown(&self) -> Arc<ShutdownCoordinator> {
        Arc::clone(&self.state.shutdown)
    }

    /// Assemble the router with all routes and middleware attached.
    pub fn router(&self) -> Router {
        let max_upload =
            usize::try_from(self.state.settings.server.max_upload_bytes).unwrap_or(usize::MAX);

        Router::new()
            .route("/transcribe", post(handlers::transcribe::transcribe))
            .route("/simplify_text", post(handlers::simplify::simplify_text))
            .route("/generate_pose", post(handlers::pose::generate_pose))
            .route(
                "/translate_signwriting",
                post(handlers::notation::translate_signwriting),
            )
            .route("/health", get(health_handler))
            .layer(DefaultBodyLimit::max(max_upload))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind the configured address and spawn the serve loop.
    ///
    /// Returns the bound address (useful with port 0) and the join
    /// handle for the loop. The loop exits once the shutdown token
    /// fires and in-flight connections finish.
    pub async fn listen(&self) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
        let bind_addr = format!(
            "{}:{}",
            self.state.settings.server.host, self.state.settings.server.port
        );
        let listener = TcpListener::bind(&bind_addr).await?;
        let addr = listener.local_addr()?;

        let router = self.router();
        let cancel = self.state.shutdown.token();

        let handle = tokio::spawn(async move {
            let serve = axum::serve(listener, router)
                .with_graceful_shutdown(cancel.cancelled_owned());
            if let Err(err) = serve.await {
                error!(error = %err, "server loop failed");
            }
        });

        info!(%addr, "listening");
        Ok((addr, handle))
    }
}

/// `GET /health`.
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health_check(state.start_time))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    fn test_server() -> SignbridgeServer {
        SignbridgeServer::new(Settings::default(), Arc::new(NotationEngine::new()))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 100_000)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ── routing ──

    #[tokio::test]
    async fn health_route_answers_ok() {
        let router = test_server().router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["uptime_secs"].is_u64());
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let router = test_server().router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/no_such_route")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_allows_cross_origin_callers() {
        let router = test_server().router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .map(|v| v.to_str().unwrap()),
            Some("*")
        );
    }

    #[tokio::test]
    async fn preflight_is_answered() {
        let router = test_server().router();
        let response = router
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/transcribe")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS)
        );
    }

    // ── transcribe request validation ──

    fn multipart_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/transcribe")
            .header(
                header::CONTENT_TYPE,
                "multipart/form-data; boundary=test-boundary",
            )
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn upload_without_audio_field_is_400() {
        let router = test_server().router();
        let body = "--test-boundary\r\n\
                    Content-Disposition: form-data; name=\"note\"\r\n\r\n\
                    not audio\r\n\
                    --test-boundary--\r\n";
        let response = router.oneshot(multipart_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "No audio file uploaded.");
    }

    #[tokio::test]
    async fn empty_audio_upload_is_400() {
        let router = test_server().router();
        let body = "--test-boundary\r\n\
                    Content-Disposition: form-data; name=\"audio\"; filename=\"clip.webm\"\r\n\
                    Content-Type: audio/webm\r\n\r\n\
                    \r\n\
                    --test-boundary--\r\n";
        let response = router.oneshot(multipart_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "Empty audio file uploaded.");
    }

    // ── notation without a model ──

    #[tokio::test]
    async fn notation_route_reports_unloaded_model() {
        let router = test_server().router();
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/translate_signwriting")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"text":"hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "ONNX model not loaded.");
    }

    // ── state plumbing ──

    #[test]
    fn settings_are_reachable_after_construction() {
        let server = test_server();
        assert_eq!(server.settings().name, "signbridge");
    }

    #[test]
    fn shutdown_coordinator_is_shared() {
        let server = test_server();
        let coordinator = server.shutdown();
        coordinator.shutdown();
        assert!(server.shutdown().is_shutting_down());
    }
}
