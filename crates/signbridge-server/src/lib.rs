//! # signbridge-server
//!
//! The HTTP surface of the signbridge backend. Five routes:
//!
//! - `POST /transcribe` multipart audio in, `{"text"}` out
//! - `POST /simplify_text` plain-language rewriting via the chat upstream
//! - `POST /generate_pose` base64-wrapped skeletal pose data
//! - `POST /translate_signwriting` sign-notation tokens from the local model
//! - `GET /health` liveness and uptime
//!
//! [`SignbridgeServer`] owns the shared state, assembles the router with
//! CORS, tracing, and upload-limit middleware, and runs the serve loop
//! until its [`ShutdownCoordinator`] fires.

#![deny(unsafe_code)]

pub mod error;
pub mod handlers;
pub mod health;
pub mod server;
pub mod shutdown;

pub use error::ApiError;
pub use server::{AppState, SignbridgeServer};
pub use shutdown::ShutdownCoordinator;
