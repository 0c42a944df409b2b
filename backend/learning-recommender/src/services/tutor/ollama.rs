use super::AnsweringService;
use crate::config::Config;
use crate::error::{RecommenderError, Result};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Answers through an Ollama-compatible `/api/generate` endpoint
pub struct OllamaAnswerService {
    client: HttpClient,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
}

impl OllamaAnswerService {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self> {
        let client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.answer_service_url,
            &config.answer_service_model,
            Duration::from_secs(config.answer_service_timeout_seconds),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Join the `response` fields of one JSON object or of newline-delimited
/// streamed chunks, then drop reasoning markers.
fn parse_generate_body(body: &str) -> Result<String> {
    let mut text = String::new();
    for line in body.lines().filter(|l| !l.trim().is_empty()) {
        let chunk: GenerateChunk = serde_json::from_str(line).map_err(|e| {
            RecommenderError::ServiceUnavailable(format!("malformed answer payload: {}", e))
        })?;
        text.push_str(&chunk.response);
    }

    Ok(text
        .replace("<think>", "")
        .replace("</think>", "")
        .trim()
        .to_string())
}

#[async_trait]
impl AnsweringService for OllamaAnswerService {
    async fn answer(&self, query: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: &self.model,
            prompt: query,
            stream: false,
        };

        debug!(url = %url, model = %self.model, "Sending question to answer service");

        let body = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_generate_body(&body)
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}
