//! # signbridge-notation
//!
//! Sign-notation inference over a locally loaded ONNX model:
//!
//! - [`engine`] — `NotationEngine`, one `ort` session behind a mutex,
//!   loaded once at startup and run on the blocking pool per request
//!
//! A missing or unloadable model is tolerated: the engine stays in the
//! unloaded state and translations fail with a typed error while the
//! rest of the backend keeps serving.

#![deny(unsafe_code)]

pub mod engine;
pub mod errors;

pub use engine::NotationEngine;
pub use errors::{NotationError, Result};
