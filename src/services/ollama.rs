use crate::errors::{EnhancerError, EnhancerResult};
use crate::structs::config::ai_config::AiConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<LocalModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalModel {
    pub name: String,
    #[serde(default)]
    pub size: u64,
}

/// Thin client for the local Ollama daemon. Requests are retried with a
/// linear backoff (`retry_delay * attempt`) up to `max_retries` times.
pub struct OllamaClient {
    http: reqwest::Client,
    host: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl OllamaClient {
    pub fn new(config: &AiConfig) -> EnhancerResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| EnhancerError::network("building HTTP client", &e.to_string()))?;

        Ok(Self {
            http,
            host: config.ollama_host.trim_end_matches('/').to_string(),
            max_retries: config.max_retries.max(1),
            retry_delay: Duration::from_secs(config.retry_delay_secs),
        })
    }

    pub async fn generate(&self, model: &str, prompt: &str) -> EnhancerResult<String> {
        let url = format!("{}/api/generate", self.host);
        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
        };

        let mut last_error = None;
        for attempt in 1..=self.max_retries {
            match self.try_generate(&url, &body).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    log::warn!(
                        "⚠️ Ollama request failed (attempt {}/{}): {}",
                        attempt,
                        self.max_retries,
                        e
                    );
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(self.retry_delay * attempt).await;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| EnhancerError::network("ollama generate", "no attempts made")))
    }

    async fn try_generate(&self, url: &str, body: &GenerateRequest<'_>) -> EnhancerResult<String> {
        let response = self.http.post(url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(EnhancerError::network(
                "ollama generate",
                &format!("HTTP {}: {}", status, text.trim()),
            ));
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.response)
    }

    /// Models actually installed on the local daemon.
    pub async fn list_local_models(&self) -> EnhancerResult<Vec<LocalModel>> {
        let url = format!("{}/api/tags", self.host);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnhancerError::network(
                "ollama tags",
                &format!("HTTP {}", status),
            ));
        }

        let parsed: TagsResponse = response.json().await?;
        Ok(parsed.models)
    }
}
