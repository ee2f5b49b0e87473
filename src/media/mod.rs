//! Object store collaborator
//!
//! Recorded audio lives in an S3-compatible store (MinIO in deployment); the
//! pipeline never downloads it. It only asks for a presigned URL that the
//! transcription service can fetch on its own schedule, which is why the
//! expiry window is generous. A URL is only a capability to read; resolving
//! one says nothing about whether the object exists.

mod s3;

pub use s3::S3MediaStore;

use crate::error::Error;
use async_trait::async_trait;

/// Which bucket a key lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Recorded answer audio; the pipeline always reads from here
    AnswerAudio,
    /// Topic/collection images, untouched by the pipeline
    Images,
}

#[async_trait]
pub trait AudioUrlResolver: Send + Sync {
    /// A time-limited, credential-free GET URL for the object.
    async fn presigned_url(&self, bucket: Bucket, key: &str) -> Result<String, Error>;
}
