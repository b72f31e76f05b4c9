//! Liveness reporting for `GET /health`.

use std::time::Instant;

use serde::Serialize;

/// Body of a health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server is answering at all.
    pub status: String,
    /// Whole seconds since the server started.
    pub uptime_secs: u64,
}

/// Build a health snapshot relative to the given start time.
pub fn health_check(start_time: Instant) -> HealthResponse {
    HealthResponse {
        status: "ok".to_string(),
        uptime_secs: start_time.elapsed().as_secs(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
