//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`Settings::default()`]
//! 2. If `~/.signbridge/settings.json` exists, deep-merge user values over
//!    defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::Settings;

/// Resolve the path to the settings file (`~/.signbridge/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".signbridge").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<Settings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<Settings> {
    let defaults = serde_json::to_value(Settings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: Settings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Each env var has strict parsing rules:
/// - Integers must be valid and within the specified range
/// - Invalid values are silently ignored (fall back to file/default)
///
/// The legacy names `GROQ_API_URL`, `GROQ_API_KEY`, `POSE_API_URL`, and
/// `SIGNWRITING_ONNX_MODEL_PATH` are honored when the corresponding
/// `SIGNBRIDGE_*` variable is unset, so existing deployments keep working.
pub fn apply_env_overrides(settings: &mut Settings) {
    // ── Server settings ─────────────────────────────────────────────
    if let Some(v) = read_env_string("SIGNBRIDGE_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = read_env_u16("SIGNBRIDGE_PORT", 1, 65535) {
        settings.server.port = v;
    }
    if let Some(v) = read_env_u64("SIGNBRIDGE_MAX_UPLOAD_BYTES", 1024, 1_073_741_824) {
        settings.server.max_upload_bytes = v;
    }

    // ── Pipeline settings ───────────────────────────────────────────
    if let Some(v) = read_env_path("SIGNBRIDGE_TRANSCODER") {
        settings.transcribe.transcoder_path = v;
    }
    if let Some(v) = read_env_path("SIGNBRIDGE_RECOGNIZER") {
        settings.transcribe.recognizer_path = v;
    }
    if let Some(v) = read_env_path("SIGNBRIDGE_RECOGNIZER_MODEL") {
        settings.transcribe.model_path = v;
    }
    if let Some(v) = read_env_path("SIGNBRIDGE_SCRATCH_DIR") {
        settings.transcribe.scratch_dir = v;
    }
    if let Some(v) = read_env_u64("SIGNBRIDGE_PROCESS_TIMEOUT_MS", 1000, 3_600_000) {
        settings.transcribe.process_timeout_ms = v;
    }

    // ── Upstream settings ───────────────────────────────────────────
    if let Some(v) =
        read_env_string("SIGNBRIDGE_SIMPLIFY_URL").or_else(|| read_env_string("GROQ_API_URL"))
    {
        settings.simplify.api_url = v;
    }
    if let Some(v) =
        read_env_string("SIGNBRIDGE_SIMPLIFY_KEY").or_else(|| read_env_string("GROQ_API_KEY"))
    {
        settings.simplify.api_key = Some(v);
    }
    if let Some(v) = read_env_string("SIGNBRIDGE_SIMPLIFY_MODEL") {
        settings.simplify.model = v;
    }
    if let Some(v) =
        read_env_string("SIGNBRIDGE_POSE_URL").or_else(|| read_env_string("POSE_API_URL"))
    {
        settings.pose.api_url = v;
    }
    if let Some(v) = read_env_path("SIGNBRIDGE_NOTATION_MODEL")
        .or_else(|| read_env_path("SIGNWRITING_ONNX_MODEL_PATH"))
    {
        settings.notation.model_path = v;
    }

    // ── Logging settings ────────────────────────────────────────────
    if let Some(v) = read_env_string("SIGNBRIDGE_LOG_LEVEL") {
        if let Ok(level) = serde_json::from_value(Value::String(v.to_lowercase())) {
            settings.logging.level = level;
        } else {
            tracing::warn!(value = %v, "invalid SIGNBRIDGE_LOG_LEVEL, ignoring");
        }
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a `u16` within a range.
pub fn parse_u16_range(val: &str, min: u16, max: u16) -> Option<u16> {
    let n: u16 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `u64` within a range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_env_path(name: &str) -> Option<PathBuf> {
    read_env_string(name).map(PathBuf::from)
}

fn read_env_u16(name: &str, min: u16, max: u16) -> Option<u16> {
    let val = std::env::var(name).ok()?;
    let result = parse_u16_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u16 env var, ignoring");
    }
    result
}

fn read_env_u64(name: &str, min: u64, max: u64) -> Option<u64> {
    let val = std::env::var(name).ok()?;
    let result = parse_u64_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u64 env var, ignoring");
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
