use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<String, Arc<Mutex<()>>>;

/// One async mutex per wallet, created on first use and removed once the
/// last holder or waiter lets go.
#[derive(Default)]
pub struct WalletLocks {
    locks: LockMap,
}

/// Held for the duration of a per-wallet critical section.
pub struct WalletGuard<'a> {
    guard: Option<OwnedMutexGuard<()>>,
    locks: &'a LockMap,
    wallet: String,
}

impl Drop for WalletGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        // entry() and remove_if() share the shard lock, so no waiter can
        // clone the Arc between the count check and the removal
        self.locks
            .remove_if(&self.wallet, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl WalletLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, wallet: &str) -> WalletGuard<'_> {
        // clone the Arc out so no shard lock is held across the await
        let lock = self
            .locks
            .entry(wallet.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = lock.lock_owned().await;

        WalletGuard {
            guard: Some(guard),
            locks: &self.locks,
            wallet: wallet.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
