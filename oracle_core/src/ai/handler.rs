use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::ai::dto::GenerationRequest;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

/// One bounded generation call. Errors, timeouts and blank output all
/// come back as `None`.
pub async fn generate_bounded(
    generator: &dyn TextGenerator,
    request: &GenerationRequest,
    timeout: Duration,
) -> Option<String> {
    match tokio::time::timeout(timeout, generator.generate(request)).await {
        Ok(Ok(text)) => {
            let text = clean_output(&text);
            if text.is_empty() {
                log::warn!("{} returned empty text", generator.name());
                None
            } else {
                Some(text)
            }
        }
        Ok(Err(e)) => {
            log::warn!("{} generation failed: {}", generator.name(), e);
            None
        }
        Err(_) => {
            log::warn!("{} generation timed out after {:?}", generator.name(), timeout);
            None
        }
    }
}

/// Strips whitespace and the wrapping quotes models like to add.
fn clean_output(text: &str) -> String {
    let trimmed = text.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(trimmed);
    unquoted.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo(&'static str);

    #[async_trait]
    impl TextGenerator for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Broken;

    #[async_trait]
    impl TextGenerator for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
            Err(anyhow::anyhow!("503 Service Unavailable"))
        }
    }

    struct Slow;

    #[async_trait]
    impl TextGenerator for Slow {
        fn name(&self) -> &str {
            "slow"
        }

        async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("too late".to_string())
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new("system", "user")
    }

    #[tokio::test]
    async fn test_strips_quotes_and_whitespace() {
        let text = generate_bounded(&Echo("  \"Welcome, degen.\" \n"), &request(), Duration::from_secs(1)).await;
        assert_eq!(text.as_deref(), Some("Welcome, degen."));
    }

    #[tokio::test]
    async fn test_blank_output_is_unavailable() {
        assert!(generate_bounded(&Echo("   "), &request(), Duration::from_secs(1)).await.is_none());
        assert!(generate_bounded(&Echo("\"\""), &request(), Duration::from_secs(1)).await.is_none());
    }

    #[tokio::test]
    async fn test_error_is_unavailable() {
        assert!(generate_bounded(&Broken, &request(), Duration::from_secs(1)).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_unavailable() {
        assert!(generate_bounded(&Slow, &request(), Duration::from_secs(10)).await.is_none());
    }
}
