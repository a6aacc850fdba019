use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;

use crate::error::{CaptionError, Result};
use crate::llm::provider::CompletionProvider;
use crate::llm::types::*;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: GEMINI_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Point the client at another API root (a proxy, or a mock server in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Bound each request; the pipeline itself never times out.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn endpoint(&self, model: &str) -> String {
        let model = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        };
        format!("{}/{}:generateContent", self.base_url, model)
    }

    pub async fn generate_content(&self, model: &str, prompt: &str) -> Result<String> {
        let url = self.endpoint(model);
        debug!("POST {} ({} prompt chars)", url, prompt.chars().count());

        let payload = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let mut request = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&payload);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let res = request.send().await?;
        let status = res.status();

        if !status.is_success() {
            let err_text = res.text().await.unwrap_or_default();
            return Err(CaptionError::ProviderError {
                message: format!("Gemini API Error (status {}): {}", status, err_text),
            });
        }

        let body: GenerateContentResponse = res.json().await?;
        if let Some(reason) = body
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.finish_reason.as_deref())
        {
            if reason != "STOP" {
                warn!("Gemini finished with reason {}", reason);
            }
        }

        Ok(body.text())
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    async fn complete(&self, prompt: &str, model_id: &str) -> Result<String> {
        self.generate_content(model_id, prompt).await
    }
}
