//! Speech-to-text port and its Deepgram implementation
//!
//! The orchestrator only sees the [`Transcriber`] trait, so retry/backoff (or
//! a different vendor) can be layered in as a decorator without touching the
//! pipeline logic.

mod deepgram;

pub use deepgram::DeepgramClient;

use crate::error::Error;
use async_trait::async_trait;

/// Turns a fetchable audio URL into plain transcript text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio_url: &str) -> Result<String, Error>;
}
