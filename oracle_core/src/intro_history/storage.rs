use std::sync::Arc;

use tokio::sync::Mutex;

use crate::clock::Clock;
use crate::intro_history::dto::{IntroEntry, IntroHistoryMap};
use crate::intro_history::persistence::IntroPersistence;
use crate::wallet::WalletAddress;

/// Last `cap` intros per wallet, written through to persistence on every
/// change. The lock is held across mutate-then-save so saves never interleave.
/// Saves run on the blocking pool since sled and file writes are synchronous.
pub struct IntroHistoryStore {
    history: Mutex<IntroHistoryMap>,
    persistence: Arc<dyn IntroPersistence>,
    clock: Arc<dyn Clock>,
    cap: usize,
    recent_window_ms: i64,
}

impl IntroHistoryStore {
    pub fn new(
        persistence: Arc<dyn IntroPersistence>,
        clock: Arc<dyn Clock>,
        cap: usize,
        recent_window_ms: i64,
    ) -> Self {
        let mut history = match persistence.load() {
            Ok(history) => {
                log::info!(
                    "Loaded intro history for {} wallets from {}",
                    history.len(),
                    persistence.name()
                );
                history
            }
            Err(e) => {
                log::error!(
                    "Failed to load intro history from {}, starting empty: {}",
                    persistence.name(),
                    e
                );
                IntroHistoryMap::new()
            }
        };
        for entries in history.values_mut() {
            keep_newest(entries, cap);
        }

        Self {
            history: Mutex::new(history),
            persistence,
            clock,
            cap,
            recent_window_ms,
        }
    }

    pub async fn record(&self, wallet: &WalletAddress, text: &str) {
        let mut history = self.history.lock().await;

        let entries = history.entry(wallet.as_str().to_string()).or_default();
        entries.push(IntroEntry::new(text, self.clock.now_millis()));
        keep_newest(entries, self.cap);

        let snapshot = history.clone();
        let persistence = self.persistence.clone();
        let saved = tokio::task::spawn_blocking(move || persistence.save(&snapshot)).await;

        match saved {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::error!(
                "Failed to persist intro history for {} to {}: {}",
                wallet,
                self.persistence.name(),
                e
            ),
            Err(e) => log::error!("Intro history save task for {} panicked: {}", wallet, e),
        }
    }

    /// Case-insensitive match against entries younger than the recent window.
    pub async fn was_recently_used(&self, wallet: &WalletAddress, text: &str) -> bool {
        let now = self.clock.now_millis();
        let history = self.history.lock().await;

        history
            .get(wallet.as_str())
            .map(|entries| {
                entries
                    .iter()
                    .any(|entry| now - entry.timestamp < self.recent_window_ms && entry.matches(text))
            })
            .unwrap_or(false)
    }

    pub async fn entries(&self, wallet: &WalletAddress) -> Vec<IntroEntry> {
        self.history
            .lock()
            .await
            .get(wallet.as_str())
            .cloned()
            .unwrap_or_default()
    }

    pub async fn wallet_count(&self) -> usize {
        self.history.lock().await.len()
    }
}

fn keep_newest(entries: &mut Vec<IntroEntry>, cap: usize) {
    if entries.len() > cap {
        let overflow = entries.len() - cap;
        entries.drain(..overflow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::ONE_HOUR_MS;
    use crate::intro_history::persistence::MemoryIntroPersistence;
    use anyhow::{anyhow, Result};
    use std::sync::Mutex as StdMutex;
    use std::thread::{self, ThreadId};

    const T0: i64 = 1_700_000_000_000;

    struct BrokenPersistence;

    impl IntroPersistence for BrokenPersistence {
        fn name(&self) -> &str {
            "broken"
        }

        fn load(&self) -> Result<IntroHistoryMap> {
            Err(anyhow!("disk on fire"))
        }

        fn save(&self, _history: &IntroHistoryMap) -> Result<()> {
            Err(anyhow!("disk on fire"))
        }
    }

    #[derive(Default)]
    struct ThreadRecordingPersistence {
        save_threads: StdMutex<Vec<ThreadId>>,
    }

    impl IntroPersistence for ThreadRecordingPersistence {
        fn name(&self) -> &str {
            "thread-recording"
        }

        fn load(&self) -> Result<IntroHistoryMap> {
            Ok(IntroHistoryMap::new())
        }

        fn save(&self, _history: &IntroHistoryMap) -> Result<()> {
            self.save_threads.lock().unwrap().push(thread::current().id());
            Ok(())
        }
    }

    fn wallet() -> WalletAddress {
        WalletAddress::parse("9Y7jX9zNQm1KpL5R8vT2UwXyZaBcDeFgHiJkLmNoPqRs").unwrap()
    }

    fn store(persistence: Arc<dyn IntroPersistence>, clock: Arc<ManualClock>) -> IntroHistoryStore {
        IntroHistoryStore::new(persistence, clock, 5, ONE_HOUR_MS)
    }

    #[tokio::test]
    async fn test_sixth_entry_evicts_oldest() {
        let clock = Arc::new(ManualClock::new(T0));
        let store = store(Arc::new(MemoryIntroPersistence::new()), clock.clone());

        for i in 1..=6 {
            store.record(&wallet(), &format!("intro {}", i)).await;
            clock.advance_millis(1_000);
        }

        let texts: Vec<String> = store.entries(&wallet()).await.into_iter().map(|e| e.text).collect();
        assert_eq!(texts, vec!["intro 2", "intro 3", "intro 4", "intro 5", "intro 6"]);
    }

    #[tokio::test]
    async fn test_recent_match_is_case_insensitive() {
        let clock = Arc::new(ManualClock::new(T0));
        let store = store(Arc::new(MemoryIntroPersistence::new()), clock.clone());

        store.record(&wallet(), "Welcome To The Prophecy").await;
        assert!(store.was_recently_used(&wallet(), "welcome to the prophecy").await);
        assert!(!store.was_recently_used(&wallet(), "welcome to the jungle").await);
    }

    #[tokio::test]
    async fn test_entries_older_than_window_do_not_block() {
        let clock = Arc::new(ManualClock::new(T0));
        let store = store(Arc::new(MemoryIntroPersistence::new()), clock.clone());

        store.record(&wallet(), "same line").await;
        clock.advance_millis(ONE_HOUR_MS - 1);
        assert!(store.was_recently_used(&wallet(), "same line").await);

        clock.advance_millis(1);
        assert!(!store.was_recently_used(&wallet(), "same line").await);
    }

    #[tokio::test]
    async fn test_every_record_is_persisted() {
        let clock = Arc::new(ManualClock::new(T0));
        let persistence = Arc::new(MemoryIntroPersistence::new());
        let store = store(persistence.clone(), clock);

        store.record(&wallet(), "one").await;
        store.record(&wallet(), "two").await;

        let saved = persistence.snapshot();
        assert_eq!(saved[wallet().as_str()].len(), 2);
        assert_eq!(saved[wallet().as_str()][1].timestamp, T0);
    }

    #[tokio::test]
    async fn test_reload_from_persistence() {
        let clock = Arc::new(ManualClock::new(T0));
        let persistence = Arc::new(MemoryIntroPersistence::new());
        store(persistence.clone(), clock.clone())
            .record(&wallet(), "remember me")
            .await;

        let reopened = store(persistence, clock);
        assert_eq!(reopened.wallet_count().await, 1);
        assert!(reopened.was_recently_used(&wallet(), "REMEMBER ME").await);
    }

    #[tokio::test]
    async fn test_persistence_failures_are_not_fatal() {
        let clock = Arc::new(ManualClock::new(T0));
        let store = store(Arc::new(BrokenPersistence), clock);

        assert_eq!(store.wallet_count().await, 0);
        store.record(&wallet(), "kept in memory").await;
        assert!(store.was_recently_used(&wallet(), "kept in memory").await);
    }

    #[tokio::test]
    async fn test_loaded_history_is_capped() {
        let clock = Arc::new(ManualClock::new(T0));
        let mut stored = IntroHistoryMap::new();
        stored.insert(
            wallet().as_str().to_string(),
            (1..=8).map(|i| IntroEntry::new(format!("intro {}", i), T0 + i)).collect(),
        );
        let store = store(Arc::new(MemoryIntroPersistence::with_history(stored)), clock);

        let texts: Vec<String> = store.entries(&wallet()).await.into_iter().map(|e| e.text).collect();
        assert_eq!(texts, vec!["intro 4", "intro 5", "intro 6", "intro 7", "intro 8"]);
        // evicted lines no longer block reuse
        assert!(!store.was_recently_used(&wallet(), "intro 1").await);
        assert!(store.was_recently_used(&wallet(), "intro 8").await);
    }

    #[tokio::test]
    async fn test_saves_run_off_the_async_thread() {
        let clock = Arc::new(ManualClock::new(T0));
        let persistence = Arc::new(ThreadRecordingPersistence::default());
        let store = store(persistence.clone(), clock);

        store.record(&wallet(), "one").await;
        store.record(&wallet(), "two").await;

        let threads = persistence.save_threads.lock().unwrap().clone();
        assert_eq!(threads.len(), 2);
        assert!(threads.iter().all(|id| *id != thread::current().id()));
    }
}
