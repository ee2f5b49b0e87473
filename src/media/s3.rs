use super::{AudioUrlResolver, Bucket};
use crate::config::ObjectStoreConfig;
use crate::error::Error;
use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use std::time::Duration;

// Long enough for the transcription service to fetch the audio well after
// the completion request that minted the URL has finished.
const URL_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

pub struct S3MediaStore {
    client: aws_sdk_s3::Client,
    answers_bucket: String,
    images_bucket: String,
}

impl S3MediaStore {
    pub fn new(cfg: &ObjectStoreConfig) -> Self {
        let credentials = Credentials::new(
            cfg.access_key.clone(),
            cfg.secret_key.clone(),
            None,
            None,
            "speechcoach-static",
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(cfg.region.clone()))
            .endpoint_url(cfg.endpoint.clone())
            .credentials_provider(credentials)
            // MinIO serves buckets as path segments, not subdomains
            .force_path_style(true)
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            answers_bucket: cfg.answers_bucket.clone(),
            images_bucket: cfg.images_bucket.clone(),
        }
    }

    fn bucket_name(&self, bucket: Bucket) -> &str {
        match bucket {
            Bucket::AnswerAudio => &self.answers_bucket,
            Bucket::Images => &self.images_bucket,
        }
    }
}

#[async_trait]
impl AudioUrlResolver for S3MediaStore {
    async fn presigned_url(&self, bucket: Bucket, key: &str) -> Result<String, Error> {
        let presigning = PresigningConfig::expires_in(URL_EXPIRY)
            .map_err(|e| Error::ObjectStorage(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(self.bucket_name(bucket))
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| Error::ObjectStorage(e.to_string()))?;

        Ok(request.uri().to_string())
    }
}
