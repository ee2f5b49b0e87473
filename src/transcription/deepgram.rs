use super::Transcriber;
use crate::config::DeepgramConfig;
use crate::error::Error;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

const SERVICE: &str = "deepgram";

/// Client for Deepgram's prerecorded transcription API.
///
/// Issues a single synchronous `listen` request per audio URL; Deepgram
/// fetches the (presigned) URL itself, so no audio bytes flow through this
/// service.
pub struct DeepgramClient {
    http: reqwest::Client,
    cfg: DeepgramConfig,
}

impl DeepgramClient {
    pub fn new(http: reqwest::Client, cfg: DeepgramConfig) -> Self {
        Self { http, cfg }
    }

    fn transcription_url(&self) -> String {
        format!(
            "{}listen?model={}&smart_format=true",
            self.cfg.base_url, self.cfg.model
        )
    }
}

#[derive(Debug, Serialize)]
struct TranscribeRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    #[serde(default)]
    results: TranscriptionResults,
}

#[derive(Debug, Default, Deserialize)]
struct TranscriptionResults {
    #[serde(default)]
    channels: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    transcript: String,
}

#[async_trait]
impl Transcriber for DeepgramClient {
    async fn transcribe(&self, audio_url: &str) -> Result<String, Error> {
        let response = self
            .http
            .post(self.transcription_url())
            .header("Authorization", format!("Token {}", self.cfg.api_key))
            .json(&TranscribeRequest { url: audio_url })
            .send()
            .await
            .map_err(|e| Error::from_reqwest(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ExternalService {
                service: SERVICE,
                detail: format!("unexpected status {}", status.as_u16()),
            });
        }

        let body: TranscribeResponse = response.json().await.map_err(|e| Error::Decoding {
            context: "deepgram response",
            detail: e.to_string(),
        })?;

        // An empty channel or alternative list is a schema violation, not a
        // reason to index out of bounds.
        let transcript = body
            .results
            .channels
            .first()
            .and_then(|channel| channel.alternatives.first())
            .map(|alternative| alternative.transcript.clone())
            .ok_or_else(|| Error::Decoding {
                context: "deepgram response",
                detail: "empty channels or alternatives".to_string(),
            })?;

        debug!(chars = transcript.len(), "received transcript");

        Ok(transcript)
    }
}
