//! Request handlers, one module per route.

pub mod notation;
pub mod pose;
pub mod simplify;
pub mod transcribe;
