use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::ai::dto::GenerationRequest;
use crate::ai::grok::GrokGenerator;
use crate::sentiment::dto::Sentiment;
use crate::wallet::WalletAddress;

#[async_trait]
pub trait SentimentSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, wallet: &WalletAddress) -> Result<Sentiment>;
}

/// Bounded lookup; anything but a clean answer reads as neutral.
pub async fn fetch_sentiment_or_neutral(
    source: &dyn SentimentSource,
    wallet: &WalletAddress,
    timeout: Duration,
) -> Sentiment {
    match tokio::time::timeout(timeout, source.fetch(wallet)).await {
        Ok(Ok(sentiment)) => sentiment,
        Ok(Err(e)) => {
            log::warn!("{} sentiment failed for {}: {}", source.name(), wallet, e);
            Sentiment::Neutral
        }
        Err(_) => {
            log::warn!("{} sentiment timed out for {}", source.name(), wallet);
            Sentiment::Neutral
        }
    }
}

/// Offline stand-in keyed on the first character of the address.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeededSentiment;

impl SeededSentiment {
    pub fn sentiment_for(wallet: &WalletAddress) -> Sentiment {
        let seed = wallet.as_str().as_bytes().first().copied().unwrap_or(0) as usize;
        Sentiment::ALL[seed % Sentiment::ALL.len()]
    }
}

#[async_trait]
impl SentimentSource for SeededSentiment {
    fn name(&self) -> &str {
        "seeded"
    }

    async fn fetch(&self, wallet: &WalletAddress) -> Result<Sentiment> {
        Ok(Self::sentiment_for(wallet))
    }
}

/// Asks Grok to sum up X chatter about the wallet in one word.
#[derive(Clone)]
pub struct GrokSentiment {
    grok: GrokGenerator,
}

impl GrokSentiment {
    pub fn new(grok: GrokGenerator) -> Self {
        Self { grok }
    }
}

#[async_trait]
impl SentimentSource for GrokSentiment {
    fn name(&self) -> &str {
        "grok"
    }

    async fn fetch(&self, wallet: &WalletAddress) -> Result<Sentiment> {
        let request = GenerationRequest::new(
            "You are a crypto social-signal classifier. Answer with exactly one word: bullish, neutral, bearish, viral or noisy.",
            format!(
                "How is X (Twitter) talking about Solana wallet {} right now?",
                wallet
            ),
        )
        .max_output_tokens(5)
        .temperature(0.0);

        let reply = self.grok.complete(&request).await?;
        Sentiment::from_text(&reply).ok_or_else(|| anyhow!("Unrecognised sentiment reply: {}", reply))
    }
}
