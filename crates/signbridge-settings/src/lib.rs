//! # signbridge-settings
//!
//! Configuration management for the signbridge backend.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`Settings::default()`]
//! 2. **User file** — `~/.signbridge/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** — `SIGNBRIDGE_*` overrides (highest priority)
//!
//! The binary loads settings once in `main`, validates them with
//! [`Settings::validate`], and shares them through server state. There is
//! no global settings singleton.
//!
//! # Usage
//!
//! ```no_run
//! use signbridge_settings::load_settings;
//!
//! let settings = load_settings().unwrap_or_default();
//! settings.validate().expect("startup validation");
//! println!("listening on {}:{}", settings.server.host, settings.server.port);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;
mod validate;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
