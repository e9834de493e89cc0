use std::sync::Arc;

use crate::cache::AnalysisCache;
use crate::clock::Clock;
use crate::config::OracleConfig;
use crate::error::OracleResult;
use crate::history::{HistoryChain, HistoryOutcome};
use crate::intro_history::IntroHistoryStore;
use crate::metrics::{MetricsCalculator, WalletMetrics};
use crate::narrative::templates::{exit_fallback, tier_script, MYSTERY_WALLET_SCRIPT};
use crate::narrative::{CallTone, ExitGenerator, NarrativeGenerator, NftHolding};
use crate::oracle::dependencies::OracleDependencies;
use crate::oracle::dto::{OracleStatus, WalletAnalysis};
use crate::oracle::locks::WalletLocks;
use crate::sentiment::handler::{fetch_sentiment_or_neutral, SentimentSource};
use crate::tier::{classify, risk_flags, Tier};
use crate::wallet::WalletAddress;

/// The service object the call manager talks to. Only an invalid wallet
/// address is ever reported as an error; every other failure degrades to
/// a fallback.
pub struct WalletOracle {
    config: OracleConfig,
    history: HistoryChain,
    sentiment: Arc<dyn SentimentSource>,
    calculator: MetricsCalculator,
    cache: AnalysisCache,
    narrator: NarrativeGenerator,
    exits: ExitGenerator,
    analysis_locks: WalletLocks,
    intro_locks: WalletLocks,
    clock: Arc<dyn Clock>,
    collaborators: Vec<String>,
}

impl WalletOracle {
    pub fn new(config: OracleConfig, deps: OracleDependencies) -> Self {
        let collaborators = deps.collaborator_names();
        let clock = deps.clock.clone();

        let intro_history = Arc::new(IntroHistoryStore::new(
            deps.intro_persistence.clone(),
            clock.clone(),
            config.intro_history_cap,
            config.intro_recent_window_ms,
        ));

        let narrator = NarrativeGenerator::new(
            deps.generator.clone(),
            intro_history,
            config.roast_level,
            config.generation_timeout(),
            config.max_intro_attempts,
        );
        let exits = ExitGenerator::new(
            deps.generator.clone(),
            config.roast_level,
            config.generation_timeout(),
            config.exit_registration_ttl_ms,
            clock.clone(),
        );

        log::info!("Wallet oracle ready with {}", collaborators.join(", "));

        Self {
            cache: AnalysisCache::new(config.analysis_ttl_ms, clock.clone()),
            calculator: MetricsCalculator::new(clock.clone()),
            history: deps.history,
            sentiment: deps.sentiment,
            narrator,
            exits,
            analysis_locks: WalletLocks::new(),
            intro_locks: WalletLocks::new(),
            clock,
            collaborators,
            config,
        }
    }

    pub async fn run(&self, wallet: &str) -> OracleResult<WalletAnalysis> {
        let wallet = WalletAddress::parse(wallet)?;
        let _guard = self.analysis_locks.acquire(wallet.as_str()).await;

        if let Some(cached) = self.cache.get(wallet.as_str()) {
            log::info!("Cache hit for {}", wallet.short());
            return Ok(cached);
        }

        log::info!("Analyzing wallet {}", wallet.short());

        let outcome = self.history.fetch(&wallet).await;
        let analysis = match &outcome {
            HistoryOutcome::Unavailable => {
                log::warn!("No history source available for {}, using mystery wallet", wallet.short());
                self.mystery_analysis(&wallet)
            }
            _ => {
                let records = outcome.records().unwrap_or_default();
                let sentiment = fetch_sentiment_or_neutral(
                    self.sentiment.as_ref(),
                    &wallet,
                    self.config.sentiment_timeout(),
                )
                .await;
                let metrics = self.calculator.compute(records).with_sentiment(sentiment);
                self.build_analysis(&wallet, metrics, outcome.source())
            }
        };

        log::info!(
            "Analysis ready for {}: {} \"{}\"",
            wallet.short(),
            analysis.tier,
            analysis.script.chars().take(50).collect::<String>()
        );

        // a missing history is not cached so a recovered provider is picked up on the next run
        if !matches!(outcome, HistoryOutcome::Unavailable) {
            self.cache.put(wallet.as_str(), analysis.clone());
        }

        Ok(analysis)
    }

    pub async fn generate_dynamic_intro(
        &self,
        wallet: &str,
        metrics: &WalletMetrics,
        tier: Tier,
        nfts: Option<&[NftHolding]>,
    ) -> OracleResult<String> {
        let wallet = WalletAddress::parse(wallet)?;
        let _guard = self.intro_locks.acquire(wallet.as_str()).await;

        Ok(self.narrator.generate_intro(&wallet, metrics, tier, nfts).await)
    }

    pub fn register_call_for_exit(&self, call_id: &str, wallet: &str, tier: Tier) -> OracleResult<()> {
        let wallet = WalletAddress::parse(wallet)?;
        log::info!("Registered call {} for exit ({}, {})", call_id, wallet.short(), tier);
        self.exits.register_call(call_id, wallet, tier);
        Ok(())
    }

    /// Closing line for a registered call. Unknown call ids get the tier 1 line.
    pub async fn generate_dynamic_exit(&self, call_id: &str, tone: CallTone) -> String {
        match self.exits.take_call(call_id) {
            Some(pending) => {
                self.exits
                    .generate_exit(&pending.wallet, pending.tier, tone)
                    .await
            }
            None => {
                log::warn!("No registered call {}, using default exit", call_id);
                exit_fallback(Tier::Newcomer).to_string()
            }
        }
    }

    /// Exit for a wallet that was never registered as a call.
    pub async fn generate_exit(&self, wallet: &str, tier: Tier, tone: CallTone) -> OracleResult<String> {
        let wallet = WalletAddress::parse(wallet)?;
        Ok(self.exits.generate_exit(&wallet, tier, tone).await)
    }

    pub async fn get_status(&self) -> OracleStatus {
        OracleStatus {
            cache_size: self.cache.len(),
            configured_collaborators: self.collaborators.clone(),
            roast_level: self.config.roast_level,
            intro_history_wallets: self.narrator.history().wallet_count().await,
            pending_exits: self.exits.pending_count(),
        }
    }

    pub fn clear_cache(&self) {
        log::info!("Clearing {} cached analyses", self.cache.len());
        self.cache.clear();
    }

    fn build_analysis(&self, wallet: &WalletAddress, metrics: WalletMetrics, source: &str) -> WalletAnalysis {
        let tier = classify(&metrics);
        let flags = risk_flags(&metrics);
        if !flags.is_empty() {
            log::debug!("Risk flags for {}: {:?}", wallet.short(), flags);
        }

        WalletAnalysis {
            wallet: wallet.clone(),
            tier,
            tier_name: tier.title().to_string(),
            script: tier_script(tier, &metrics),
            tone: tier.tone(),
            voice_profile: tier.voice(),
            risk_flags: flags,
            metrics,
            timestamp: self.clock.now(),
            history_source: source.to_string(),
        }
    }

    fn mystery_analysis(&self, wallet: &WalletAddress) -> WalletAnalysis {
        let mut analysis = self.build_analysis(wallet, WalletMetrics::empty(), HistoryOutcome::Unavailable.source());
        analysis.script = MYSTERY_WALLET_SCRIPT.to_string();
        analysis
    }
}
