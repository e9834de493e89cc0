use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::ai::dto::{ChatCompletionRequest, ChatCompletionResponse, GenerationRequest};
use crate::ai::handler::TextGenerator;

/// OpenAI-compatible chat-completions client pointed at xAI's Grok API.
#[derive(Clone)]
pub struct GrokGenerator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GrokGenerator {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            model,
        }
    }

    pub async fn complete(&self, request: &GenerationRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = ChatCompletionRequest::from_generation(&self.model, request);

        log::debug!("Grok request to {} (model {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(anyhow!("Grok responded with {}: {}", status, error_body));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Empty Grok response"))
    }
}

#[async_trait]
impl TextGenerator for GrokGenerator {
    fn name(&self) -> &str {
        "grok"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.complete(request).await
    }
}
