use std::sync::Arc;

use crate::ai::grok::GrokGenerator;
use crate::ai::openai::OpenAiGenerator;
use crate::ai::TextGenerator;
use crate::clock::{Clock, SystemClock};
use crate::config::OracleConfig;
use crate::history::helius::HeliusProvider;
use crate::history::quicknode::QuickNodeProvider;
use crate::history::synthetic::SyntheticHistory;
use crate::history::{HistoryChain, HistoryProvider};
use crate::intro_history::IntroPersistence;
use crate::sentiment::handler::{GrokSentiment, SeededSentiment, SentimentSource};

/// Everything the oracle talks to, injected at construction.
#[derive(Clone)]
pub struct OracleDependencies {
    pub history: HistoryChain,
    pub sentiment: Arc<dyn SentimentSource>,
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub intro_persistence: Arc<dyn IntroPersistence>,
    pub clock: Arc<dyn Clock>,
}

impl OracleDependencies {
    /// Wires live collaborators for every key present in `config`.
    pub fn from_config(config: &OracleConfig, intro_persistence: Arc<dyn IntroPersistence>) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let mut providers: Vec<Arc<dyn HistoryProvider>> = Vec::new();
        if let Some(key) = &config.helius_api_key {
            providers.push(Arc::new(HeliusProvider::new(key.clone())));
        }
        if let Some(endpoint) = &config.quicknode_endpoint {
            providers.push(Arc::new(QuickNodeProvider::new(endpoint)));
        }
        let synthetic = config
            .synthetic_history
            .then(|| SyntheticHistory::new(clock.clone()));
        let history = HistoryChain::new(providers, synthetic, config.history_timeout());

        let grok = config.grok_api_key.as_ref().map(|key| {
            GrokGenerator::new(
                key.clone(),
                config.grok_base_url.clone(),
                config.grok_model.clone(),
            )
        });

        let sentiment: Arc<dyn SentimentSource> = match &grok {
            Some(grok) => Arc::new(GrokSentiment::new(grok.clone())),
            None => Arc::new(SeededSentiment),
        };

        let generator: Option<Arc<dyn TextGenerator>> = match (grok, &config.openai_api_key) {
            (Some(grok), _) => Some(Arc::new(grok)),
            (None, Some(key)) => match OpenAiGenerator::new(key) {
                Ok(openai) => Some(Arc::new(openai)),
                Err(e) => {
                    log::error!("Failed to create OpenAI client, narration will use templates: {}", e);
                    None
                }
            },
            (None, None) => None,
        };

        Self {
            history,
            sentiment,
            generator,
            intro_persistence,
            clock,
        }
    }

    /// No network at all: synthetic history, seeded sentiment, templates only.
    pub fn offline(intro_persistence: Arc<dyn IntroPersistence>, clock: Arc<dyn Clock>) -> Self {
        let history = HistoryChain::new(
            Vec::new(),
            Some(SyntheticHistory::new(clock.clone())),
            OracleConfig::default().history_timeout(),
        );

        Self {
            history,
            sentiment: Arc::new(SeededSentiment),
            generator: None,
            intro_persistence,
            clock,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_history(mut self, history: HistoryChain) -> Self {
        self.history = history;
        self
    }

    pub fn with_sentiment(mut self, sentiment: Arc<dyn SentimentSource>) -> Self {
        self.sentiment = sentiment;
        self
    }

    /// `kind:name` labels for status reporting.
    pub fn collaborator_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .history
            .provider_names()
            .into_iter()
            .map(|name| format!("history:{}", name))
            .collect();
        if self.history.has_synthetic() {
            names.push("history:synthetic".to_string());
        }
        names.push(format!("sentiment:{}", self.sentiment.name()));
        if let Some(generator) = &self.generator {
            names.push(format!("generator:{}", generator.name()));
        }
        names.push(format!("persistence:{}", self.intro_persistence.name()));
        names
    }
}
