use serde::{Deserialize, Serialize};
use std::fmt;

/// One on-chain transaction as supplied by a history provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub signature: String,
    /// Unix seconds; some providers omit it.
    pub block_time: Option<i64>,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub amount: f64,
    pub token: Option<String>,
    pub pnl: Option<f64>,
}

impl TransactionRecord {
    pub fn is_trade(&self) -> bool {
        self.kind == TxKind::Swap || self.pnl.is_some()
    }

    pub fn pnl_or_zero(&self) -> f64 {
        self.pnl.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Swap,
    Transfer,
    Burn,
    Mint,
    Stake,
    #[serde(other)]
    Unknown,
}

impl TxKind {
    /// Maps provider labels such as Helius' `SWAP` / `TRANSFER`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "swap" => TxKind::Swap,
            "transfer" => TxKind::Transfer,
            "burn" | "burn_nft" => TxKind::Burn,
            "mint" | "token_mint" | "nft_mint" => TxKind::Mint,
            "stake" | "stake_sol" | "unstake_sol" => TxKind::Stake,
            _ => TxKind::Unknown,
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxKind::Swap => write!(f, "swap"),
            TxKind::Transfer => write!(f, "transfer"),
            TxKind::Burn => write!(f, "burn"),
            TxKind::Mint => write!(f, "mint"),
            TxKind::Stake => write!(f, "stake"),
            TxKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Symbols for the handful of mints the narration cares about.
pub fn symbol_for_mint(mint: &str) -> Option<&'static str> {
    match mint {
        "So11111111111111111111111111111111111111112" => Some("SOL"),
        "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v" => Some("USDC"),
        "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263" => Some("BONK"),
        "EKpQGSJtjMFqKZ9KQanSqYXRcF8fBopzLHYxdM65zcjm" => Some("WIF"),
        _ => None,
    }
}
