//! Generative-text port and its Gemini implementation
//!
//! Mirrors the transcription module: the orchestrator depends on the
//! [`Analyzer`] trait, the Gemini client is one implementation of it.

mod gemini;

pub use gemini::GeminiClient;

use crate::error::Error;
use async_trait::async_trait;

/// Sends an analysis prompt to a generative model and returns its raw reply.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, prompt: &str) -> Result<String, Error>;
}
