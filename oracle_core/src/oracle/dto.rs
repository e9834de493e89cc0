use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::RoastLevel;
use crate::metrics::WalletMetrics;
use crate::tier::{RiskFlag, Tier, Tone, VoiceProfile};
use crate::wallet::WalletAddress;

/// The result of one `run`. Cached, never merged: a refresh replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAnalysis {
    pub wallet: WalletAddress,
    pub tier: Tier,
    pub tier_name: String,
    pub metrics: WalletMetrics,
    pub script: String,
    pub tone: Tone,
    pub voice_profile: VoiceProfile,
    pub risk_flags: BTreeSet<RiskFlag>,
    pub timestamp: DateTime<Utc>,
    /// Which history source fed the metrics, e.g. `helius` or `synthetic`.
    pub history_source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleStatus {
    pub cache_size: usize,
    pub configured_collaborators: Vec<String>,
    pub roast_level: RoastLevel,
    pub intro_history_wallets: usize,
    pub pending_exits: usize,
}
