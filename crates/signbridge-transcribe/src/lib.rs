//! # signbridge-transcribe
//!
//! The speech-to-text pipeline behind `POST /transcribe`.
//!
//! # Architecture
//!
//! ```text
//! upload bytes → StagedFile (uuid-v7 scratch file)
//! → transcoder (ffmpeg: -vn -ar 16000 -ac 1 -c:a pcm_s16le) → WAV guard
//! → recognizer (whisper-cli: -m MODEL -f WAV -otxt) → raw stdout
//! → sanitize (strip timestamp ranges, join lines) → transcript
//! ```
//!
//! Both external processes are awaited `tokio::process` children with a
//! per-invocation timeout and cancellation; scratch files are RAII guards.

pub mod errors;
pub mod exec;
pub mod pipeline;
pub mod recognize;
pub mod sanitize;
pub mod staging;
pub mod transcode;

pub use errors::{PipelineError, Result};
pub use pipeline::{PipelineConfig, TranscriptionPipeline};
pub use sanitize::sanitize_transcript;
pub use staging::StagedFile;
