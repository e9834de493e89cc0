use std::{sync::Arc, time::Duration};

use dashmap::DashMap;

use crate::ai::{generate_bounded, TextGenerator};
use crate::clock::Clock;
use crate::config::RoastLevel;
use crate::narrative::dto::{CallTone, PendingExit};
use crate::narrative::prompt::exit_request;
use crate::narrative::templates::exit_fallback;
use crate::tier::Tier;
use crate::wallet::WalletAddress;

/// Closing lines. Exits are not checked for repeats.
///
/// Registrations whose exit is never requested expire once their age reaches
/// `ttl_ms`. Expired entries are swept on register and on status reads, and
/// an expired call id reads as unknown.
pub struct ExitGenerator {
    generator: Option<Arc<dyn TextGenerator>>,
    roast_level: RoastLevel,
    timeout: Duration,
    pending: DashMap<String, PendingExit>,
    ttl_ms: i64,
    clock: Arc<dyn Clock>,
}

impl ExitGenerator {
    pub fn new(
        generator: Option<Arc<dyn TextGenerator>>,
        roast_level: RoastLevel,
        timeout: Duration,
        ttl_ms: i64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            generator,
            roast_level,
            timeout,
            pending: DashMap::new(),
            ttl_ms,
            clock,
        }
    }

    /// Re-registering a call id replaces the earlier registration.
    pub fn register_call(&self, call_id: &str, wallet: WalletAddress, tier: Tier) {
        let now = self.clock.now_millis();
        self.sweep_expired(now);
        self.pending.insert(
            call_id.to_string(),
            PendingExit {
                wallet,
                tier,
                registered_at: now,
            },
        );
    }

    /// Consumes the registration, since the call is over once its exit is spoken.
    pub fn take_call(&self, call_id: &str) -> Option<PendingExit> {
        let now = self.clock.now_millis();
        let (_, pending) = self.pending.remove(call_id)?;
        if now - pending.registered_at >= self.ttl_ms {
            log::debug!("Registration for call {} expired", call_id);
            return None;
        }
        Some(pending)
    }

    pub fn pending_count(&self) -> usize {
        self.sweep_expired(self.clock.now_millis());
        self.pending.len()
    }

    fn sweep_expired(&self, now: i64) {
        self.pending
            .retain(|_, pending| now - pending.registered_at < self.ttl_ms);
    }

    pub async fn generate_exit(&self, wallet: &WalletAddress, tier: Tier, tone: CallTone) -> String {
        let generator = match &self.generator {
            Some(generator) => generator,
            None => return exit_fallback(tier).to_string(),
        };

        let request = exit_request(wallet, tier, tone, self.roast_level);
        match generate_bounded(generator.as_ref(), &request, self.timeout).await {
            Some(text) => {
                log::info!("Generated {} exit for {} ({})", tone, wallet, tier);
                text
            }
            None => {
                log::warn!("Exit generation unavailable for {}, using fallback", wallet);
                exit_fallback(tier).to_string()
            }
        }
    }
}
