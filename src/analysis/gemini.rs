use super::Analyzer;
use crate::config::GeminiConfig;
use crate::error::Error;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

const SERVICE: &str = "gemini";

/// Client for the Gemini `generateContent` API.
pub struct GeminiClient {
    http: reqwest::Client,
    cfg: GeminiConfig,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, cfg: GeminiConfig) -> Self {
        Self { http, cfg }
    }

    // The API key travels as a query parameter; keep this URL out of logs.
    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.cfg.base_url, self.cfg.model, self.cfg.api_key
        )
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

#[async_trait]
impl Analyzer for GeminiClient {
    async fn analyze(&self, prompt: &str) -> Result<String, Error> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.generate_url())
            .json(&request)
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

        let body: GenerateContentResponse = response.json().await.map_err(|e| Error::Decoding {
            context: "gemini response",
            detail: e.to_string(),
        })?;

        let text = body
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.clone())
            .ok_or_else(|| Error::ExternalService {
                service: SERVICE,
                detail: "no candidates in response".to_string(),
            })?;

        debug!(chars = text.len(), "received analysis");

        Ok(text)
    }
}
