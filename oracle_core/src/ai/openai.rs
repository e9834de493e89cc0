use anyhow::Result;
use async_trait::async_trait;
use open_ai_rust_responses_by_sshift::{Client as OAIClient, Model, ReasoningEffort, Request, Verbosity};

use crate::ai::dto::GenerationRequest;
use crate::ai::handler::TextGenerator;

/// Responses API backend, used when no Grok key is configured.
#[derive(Clone)]
pub struct OpenAiGenerator {
    openai_client: OAIClient,
}

impl OpenAiGenerator {
    pub fn new(api_key: &str) -> Result<Self> {
        let openai_client = OAIClient::new(api_key)?;
        Ok(Self { openai_client })
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let oai_request = Request::builder()
            .model(Model::GPT5Nano)
            .instructions(request.instructions.clone())
            .input(request.input.clone())
            .max_output_tokens(request.max_output_tokens)
            .verbosity(Verbosity::Low)
            .reasoning_effort(ReasoningEffort::Minimal)
            .build();

        let response = self.openai_client.responses.create(oai_request).await?;

        Ok(response.output_text().trim().to_string())
    }
}
