//! # signbridge-relay
//!
//! HTTP forwarders for the collaborator upstreams:
//!
//! - [`simplify`] — `SimplifyClient` for an OpenAI-compatible
//!   chat-completions endpoint (Groq by default); turns transcripts into
//!   plain-language text
//! - [`pose`] — `PoseClient` for the spoken-text-to-signed-pose cloud
//!   function; returns binary pose data untouched
//!
//! Both clients hold a reused [`reqwest::Client`] configured with the
//! upstream timeout from settings. Errors distinguish missing
//! configuration, non-success upstream replies, transport failures, and
//! malformed 2xx bodies so the HTTP layer can map each to a distinct
//! status code.

#![deny(unsafe_code)]

pub mod errors;
pub mod pose;
pub mod simplify;

pub use errors::{RelayError, Result};
pub use pose::PoseClient;
pub use simplify::SimplifyClient;
