use std::sync::Arc;

use crate::clock::Clock;
use crate::history::TransactionRecord;
use crate::metrics::dto::{
    WalletMetrics, COLD_STREAK_PNL, HOT_STREAK_PNL, RUG_PNL, WHALE_VOLUME,
};
use crate::metrics::helpers::std_dev;

pub const MEME_TOKENS: [&str; 5] = ["SHIB", "DOGE", "PEPE", "BONK", "WIF"];
pub const RECENT_WINDOW_SECS: i64 = 7 * 86_400;
const SECONDS_PER_DAY: i64 = 86_400;

/// Turns a raw transaction list into [`WalletMetrics`]. Sentiment is not
/// derived here; the result carries `Sentiment::Neutral` until the caller
/// attaches one with [`WalletMetrics::with_sentiment`].
#[derive(Clone)]
pub struct MetricsCalculator {
    clock: Arc<dyn Clock>,
}

impl MetricsCalculator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn compute(&self, history: &[TransactionRecord]) -> WalletMetrics {
        compute_at(history, self.clock.now_secs())
    }
}

pub fn compute_at(history: &[TransactionRecord], now_secs: i64) -> WalletMetrics {
    if history.is_empty() {
        return WalletMetrics::empty();
    }

    let tx_count = history.len();
    let recent_cutoff = now_secs - RECENT_WINDOW_SECS;

    let mut total_volume = 0.0;
    let mut meme_txs = 0usize;
    let mut oldest = i64::MAX;
    let mut trade_pnls = Vec::new();
    let mut wins = 0usize;
    let mut losses = 0usize;
    let mut rugs = 0usize;
    let mut recent_pnl = 0.0;

    for tx in history {
        total_volume += tx.amount;
        oldest = oldest.min(tx.block_time.unwrap_or(now_secs));

        if tx
            .token
            .as_deref()
            .map(|token| MEME_TOKENS.contains(&token.to_uppercase().as_str()))
            .unwrap_or(false)
        {
            meme_txs += 1;
        }

        if !tx.is_trade() {
            continue;
        }

        let pnl = tx.pnl_or_zero();
        trade_pnls.push(pnl);

        if pnl > 0.0 {
            wins += 1;
        } else if pnl < 0.0 {
            losses += 1;
        }
        if pnl < RUG_PNL {
            rugs += 1;
        }
        if tx.block_time.unwrap_or(0) > recent_cutoff {
            recent_pnl += pnl;
        }
    }

    let trade_count = trade_pnls.len();
    let win_ratio = if losses == 0 {
        1.0
    } else {
        wins as f64 / (wins + losses) as f64
    };
    let total_pnl: f64 = trade_pnls.iter().sum();
    let avg_pnl = if trade_count > 0 {
        total_pnl / trade_count as f64
    } else {
        0.0
    };
    let max_drawdown = trade_pnls.iter().copied().fold(0.0_f64, f64::min);
    let rug_ratio = if trade_count > 0 {
        rugs as f64 / trade_count as f64
    } else {
        0.0
    };

    WalletMetrics {
        tx_count,
        trade_count,
        wins,
        losses,
        total_volume,
        win_ratio,
        total_pnl,
        avg_pnl,
        max_drawdown,
        volatility: std_dev(&trade_pnls),
        meme_exposure: meme_txs as f64 / tx_count as f64,
        rug_ratio,
        recent_pnl,
        is_hot_streak: recent_pnl > HOT_STREAK_PNL,
        is_cold_streak: recent_pnl < COLD_STREAK_PNL,
        is_whale: total_volume > WHALE_VOLUME,
        days_active: ((now_secs - oldest) / SECONDS_PER_DAY).max(0),
        x_sentiment: Default::default(),
    }
}
