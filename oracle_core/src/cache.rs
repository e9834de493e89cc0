use std::sync::Arc;

use dashmap::DashMap;

use crate::clock::Clock;
use crate::oracle::dto::WalletAnalysis;

struct CachedAnalysis {
    analysis: WalletAnalysis,
    inserted_at: i64,
}

/// Completed analyses keyed by wallet. Expiry is checked on read; an entry
/// is stale once its age reaches `ttl_ms`.
pub struct AnalysisCache {
    entries: DashMap<String, CachedAnalysis>,
    ttl_ms: i64,
    clock: Arc<dyn Clock>,
}

impl AnalysisCache {
    pub fn new(ttl_ms: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl_ms,
            clock,
        }
    }

    pub fn get(&self, wallet: &str) -> Option<WalletAnalysis> {
        let now = self.clock.now_millis();

        {
            let entry = self.entries.get(wallet)?;
            if now - entry.inserted_at < self.ttl_ms {
                return Some(entry.analysis.clone());
            }
        }

        self.entries
            .remove_if(wallet, |_, cached| now - cached.inserted_at >= self.ttl_ms);
        None
    }

    pub fn put(&self, wallet: &str, analysis: WalletAnalysis) {
        self.entries.insert(
            wallet.to_string(),
            CachedAnalysis {
                analysis,
                inserted_at: self.clock.now_millis(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::ONE_HOUR_MS;
    use crate::metrics::WalletMetrics;
    use crate::tier::Tier;
    use crate::wallet::WalletAddress;
    use std::collections::BTreeSet;

    const WALLET: &str = "9Y7jX9zNQm1KpL5R8vT2UwXyZaBcDeFgHiJkLmNoPqRs";

    fn analysis(clock: &ManualClock) -> WalletAnalysis {
        let tier = Tier::Newcomer;
        WalletAnalysis {
            wallet: WalletAddress::parse(WALLET).unwrap(),
            tier,
            tier_name: tier.title().to_string(),
            metrics: WalletMetrics::empty(),
            script: "hello".to_string(),
            tone: tier.tone(),
            voice_profile: tier.voice(),
            risk_flags: BTreeSet::new(),
            timestamp: clock.now(),
            history_source: "synthetic".to_string(),
        }
    }

    #[test]
    fn test_hit_until_exactly_ttl() {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let cache = AnalysisCache::new(ONE_HOUR_MS, clock.clone());
        cache.put(WALLET, analysis(&clock));

        clock.advance_millis(ONE_HOUR_MS - 1);
        assert!(cache.get(WALLET).is_some());

        clock.advance_millis(1);
        assert!(cache.get(WALLET).is_none());
        // stale entries are dropped on read
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_replaces_and_resets_age() {
        let clock = Arc::new(ManualClock::new(0));
        let cache = AnalysisCache::new(ONE_HOUR_MS, clock.clone());
        cache.put(WALLET, analysis(&clock));

        clock.advance_millis(ONE_HOUR_MS - 10);
        let mut fresh = analysis(&clock);
        fresh.script = "refreshed".to_string();
        cache.put(WALLET, fresh);

        clock.advance_millis(100);
        assert_eq!(cache.get(WALLET).unwrap().script, "refreshed");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_miss_and_clear() {
        let clock = Arc::new(ManualClock::new(0));
        let cache = AnalysisCache::new(ONE_HOUR_MS, clock.clone());
        assert!(cache.get(WALLET).is_none());

        cache.put(WALLET, analysis(&clock));
        cache.clear();
        assert!(cache.get(WALLET).is_none());
    }
}
