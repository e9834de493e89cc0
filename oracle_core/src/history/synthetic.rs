use std::sync::Arc;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::clock::Clock;
use crate::history::dto::{TransactionRecord, TxKind};
use crate::wallet::WalletAddress;

const SECONDS_PER_DAY: i64 = 86_400;
const KINDS: [TxKind; 3] = [TxKind::Swap, TxKind::Transfer, TxKind::Burn];
const TOKENS: [&str; 5] = ["SOL", "USDC", "$TICKER", "SHIB", "PEPE"];

/// Reproducible stand-in history for when no provider answers.
#[derive(Clone)]
pub struct SyntheticHistory {
    clock: Arc<dyn Clock>,
}

impl SyntheticHistory {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn generate(&self, wallet: &WalletAddress) -> Vec<TransactionRecord> {
        let first_byte = wallet.as_str().as_bytes().first().copied().unwrap_or(0) as usize;
        let tx_count = 20 + (first_byte % 80);
        let mut rng = StdRng::seed_from_u64(wallet_seed(wallet.as_str()));
        let now = self.clock.now_secs();

        (0..tx_count)
            .map(|i| {
                let amount: f64 = rng.gen_range(0.1..10.1);
                let pnl: f64 = rng.gen_range(-50.0..50.0);
                TransactionRecord {
                    signature: format!("sig_{}", i),
                    block_time: Some(now - i as i64 * SECONDS_PER_DAY),
                    kind: KINDS[i % KINDS.len()],
                    amount: round2(amount),
                    token: Some(TOKENS[i % TOKENS.len()].to_string()),
                    pnl: Some(round2(pnl)),
                }
            })
            .collect()
    }
}

fn wallet_seed(wallet: &str) -> u64 {
    wallet
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |acc, b| {
            (acc ^ b as u64).wrapping_mul(0x0000_0100_0000_01b3)
        })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
