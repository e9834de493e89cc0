use std::{sync::Arc, time::Duration};

use crate::ai::{generate_bounded, TextGenerator};
use crate::config::RoastLevel;
use crate::intro_history::IntroHistoryStore;
use crate::metrics::WalletMetrics;
use crate::narrative::dto::NftHolding;
use crate::narrative::prompt::{build_data_dump, intro_request};
use crate::narrative::templates::tier_script;
use crate::tier::Tier;
use crate::wallet::WalletAddress;

pub struct NarrativeGenerator {
    generator: Option<Arc<dyn TextGenerator>>,
    history: Arc<IntroHistoryStore>,
    roast_level: RoastLevel,
    timeout: Duration,
    max_attempts: u32,
}

impl NarrativeGenerator {
    pub fn new(
        generator: Option<Arc<dyn TextGenerator>>,
        history: Arc<IntroHistoryStore>,
        roast_level: RoastLevel,
        timeout: Duration,
        max_attempts: u32,
    ) -> Self {
        Self {
            generator,
            history,
            roast_level,
            timeout,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn history(&self) -> &Arc<IntroHistoryStore> {
        &self.history
    }

    /// Always returns speakable text. A generated line is only accepted if
    /// the wallet has not heard it within the recent window; otherwise the
    /// model is asked again, up to `max_attempts` calls in total.
    pub async fn generate_intro(
        &self,
        wallet: &WalletAddress,
        metrics: &WalletMetrics,
        tier: Tier,
        nfts: Option<&[NftHolding]>,
    ) -> String {
        let fallback = tier_script(tier, metrics);

        let generator = match &self.generator {
            Some(generator) => generator,
            None => {
                log::warn!("No text generator configured, using fallback intro for {}", wallet);
                return fallback;
            }
        };

        let data_dump = build_data_dump(wallet, metrics, tier, nfts);

        for attempt in 1..=self.max_attempts {
            let request = intro_request(wallet, tier, &data_dump, self.roast_level, attempt > 1);

            let candidate = match generate_bounded(generator.as_ref(), &request, self.timeout).await {
                Some(text) => text,
                None => {
                    log::warn!("Intro generation unavailable for {}, using fallback", wallet);
                    return fallback;
                }
            };

            if self.history.was_recently_used(wallet, &candidate).await {
                log::info!(
                    "Duplicate intro for {} on attempt {}/{}, regenerating",
                    wallet,
                    attempt,
                    self.max_attempts
                );
                continue;
            }

            self.history.record(wallet, &candidate).await;
            log::info!("Generated intro for {} ({}) on attempt {}", wallet, tier, attempt);
            return candidate;
        }

        log::warn!(
            "Intro for {} still duplicate after {} attempts, using fallback",
            wallet,
            self.max_attempts
        );
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::GenerationRequest;
    use crate::clock::ManualClock;
    use crate::config::ONE_HOUR_MS;
    use crate::intro_history::MemoryIntroPersistence;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Replies from a script, repeating the last line once it runs out.
    struct Scripted {
        replies: Mutex<Vec<Option<String>>>,
        calls: AtomicUsize,
        retries_seen: AtomicUsize,
    }

    impl Scripted {
        fn new(replies: &[Option<&str>]) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.iter().map(|r| r.map(str::to_string)).collect()),
                calls: AtomicUsize::new(0),
                retries_seen: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, request: &GenerationRequest) -> Result<String> {
            let index = self.calls.fetch_add(1, Ordering::SeqCst);
            if request.input.contains("Make it different") {
                self.retries_seen.fetch_add(1, Ordering::SeqCst);
            }
            let replies = self.replies.lock().unwrap();
            let reply = replies.get(index).or_else(|| replies.last()).cloned().flatten();
            reply.ok_or_else(|| anyhow!("503 Service Unavailable"))
        }
    }

    fn wallet() -> WalletAddress {
        WalletAddress::parse("9Y7jX9zNQm1KpL5R8vT2UwXyZaBcDeFgHiJkLmNoPqRs").unwrap()
    }

    fn store() -> Arc<IntroHistoryStore> {
        Arc::new(IntroHistoryStore::new(
            Arc::new(MemoryIntroPersistence::new()),
            Arc::new(ManualClock::new(1_700_000_000_000)),
            5,
            ONE_HOUR_MS,
        ))
    }

    fn narrator(generator: Option<Arc<dyn TextGenerator>>, history: Arc<IntroHistoryStore>) -> NarrativeGenerator {
        NarrativeGenerator::new(generator, history, RoastLevel::Fire, Duration::from_secs(10), 3)
    }

    #[tokio::test]
    async fn test_no_generator_returns_fallback() {
        let metrics = WalletMetrics::empty();
        let intro = narrator(None, store())
            .generate_intro(&wallet(), &metrics, Tier::Newcomer, None)
            .await;
        assert_eq!(intro, tier_script(Tier::Newcomer, &metrics));
    }

    #[tokio::test]
    async fn test_accepted_intro_is_recorded() {
        let generator = Scripted::new(&[Some("Fresh take on this degen.")]);
        let history = store();
        let intro = narrator(Some(generator.clone()), history.clone())
            .generate_intro(&wallet(), &WalletMetrics::empty(), Tier::Degen, None)
            .await;

        assert_eq!(intro, "Fresh take on this degen.");
        assert_eq!(generator.calls(), 1);
        assert_eq!(history.entries(&wallet()).await.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_triggers_regeneration() {
        let history = store();
        history.record(&wallet(), "Same old line.").await;

        let generator = Scripted::new(&[Some("same OLD line."), Some("A brand new line.")]);
        let intro = narrator(Some(generator.clone()), history.clone())
            .generate_intro(&wallet(), &WalletMetrics::empty(), Tier::Degen, None)
            .await;

        assert_eq!(intro, "A brand new line.");
        assert_eq!(generator.calls(), 2);
        assert_eq!(generator.retries_seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_three_duplicates_fall_back() {
        let history = store();
        history.record(&wallet(), "Stuck on repeat.").await;

        let generator = Scripted::new(&[Some("Stuck on repeat.")]);
        let metrics = WalletMetrics::empty();
        let intro = narrator(Some(generator.clone()), history.clone())
            .generate_intro(&wallet(), &metrics, Tier::Steady, None)
            .await;

        assert_eq!(intro, tier_script(Tier::Steady, &metrics));
        assert_eq!(generator.calls(), 3);
        // fallbacks are not recorded
        assert_eq!(history.entries(&wallet()).await.len(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_generator_falls_back_immediately() {
        let generator = Scripted::new(&[None]);
        let metrics = WalletMetrics::empty();
        let intro = narrator(Some(generator.clone()), store())
            .generate_intro(&wallet(), &metrics, Tier::Oracle, None)
            .await;

        assert_eq!(intro, tier_script(Tier::Oracle, &metrics));
        assert_eq!(generator.calls(), 1);
    }
}
