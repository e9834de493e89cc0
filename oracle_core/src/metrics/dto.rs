use serde::{Deserialize, Serialize};

use crate::metrics::helpers::{money, percent};
use crate::sentiment::Sentiment;

pub const WHALE_VOLUME: f64 = 50_000.0;
pub const HOT_STREAK_PNL: f64 = 50.0;
pub const COLD_STREAK_PNL: f64 = -30.0;
pub const RUG_PNL: f64 = -50.0;

/// Behavioural features of one wallet. Ratios are fractions in `0..=1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletMetrics {
    pub tx_count: usize,
    pub trade_count: usize,
    pub wins: usize,
    pub losses: usize,
    pub total_volume: f64,
    /// 1.0 whenever there are no losing trades, including no trades at all.
    pub win_ratio: f64,
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,
    #[serde(rename = "avgPnL")]
    pub avg_pnl: f64,
    pub max_drawdown: f64,
    pub volatility: f64,
    pub meme_exposure: f64,
    pub rug_ratio: f64,
    #[serde(rename = "recentPnL")]
    pub recent_pnl: f64,
    pub is_hot_streak: bool,
    pub is_cold_streak: bool,
    pub is_whale: bool,
    pub days_active: i64,
    pub x_sentiment: Sentiment,
}

impl WalletMetrics {
    pub fn empty() -> Self {
        Self {
            tx_count: 0,
            trade_count: 0,
            wins: 0,
            losses: 0,
            total_volume: 0.0,
            win_ratio: 1.0,
            total_pnl: 0.0,
            avg_pnl: 0.0,
            max_drawdown: 0.0,
            volatility: 0.0,
            meme_exposure: 0.0,
            rug_ratio: 0.0,
            recent_pnl: 0.0,
            is_hot_streak: false,
            is_cold_streak: false,
            is_whale: false,
            days_active: 0,
            x_sentiment: Sentiment::Neutral,
        }
    }

    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.x_sentiment = sentiment;
        self
    }

    pub fn win_pct(&self) -> String {
        percent(self.win_ratio)
    }

    pub fn rug_pct(&self) -> String {
        percent(self.rug_ratio)
    }

    pub fn meme_pct(&self) -> String {
        percent(self.meme_exposure)
    }

    pub fn volume_display(&self) -> String {
        money(self.total_volume)
    }

    pub fn pnl_display(&self) -> String {
        money(self.total_pnl)
    }
}

impl Default for WalletMetrics {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metrics_are_a_perfect_ratio() {
        let metrics = WalletMetrics::empty();
        assert_eq!(metrics.tx_count, 0);
        assert_eq!(metrics.win_ratio, 1.0);
        assert_eq!(metrics.win_pct(), "100.0");
        assert_eq!(metrics.x_sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_serializes_with_wire_names() {
        let value = serde_json::to_value(WalletMetrics::empty().with_sentiment(Sentiment::Viral)).unwrap();
        assert_eq!(value["txCount"], 0);
        assert_eq!(value["totalPnL"], 0.0);
        assert_eq!(value["xSentiment"], "viral");
        assert!(value.get("recentPnL").is_some());
    }
}
