use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::history::dto::{symbol_for_mint, TransactionRecord, TxKind};
use crate::history::handler::HistoryProvider;
use crate::wallet::WalletAddress;

pub const HELIUS_BASE_URL: &str = "https://api.helius.xyz";
const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeliusTransaction {
    signature: String,
    timestamp: Option<i64>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    token_transfers: Vec<HeliusTokenTransfer>,
    #[serde(default)]
    native_transfers: Vec<HeliusNativeTransfer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeliusTokenTransfer {
    mint: String,
    #[serde(default)]
    token_amount: f64,
}

#[derive(Debug, Deserialize)]
struct HeliusNativeTransfer {
    #[serde(default)]
    amount: i64,
}

impl From<HeliusTransaction> for TransactionRecord {
    fn from(tx: HeliusTransaction) -> Self {
        let kind = tx
            .kind
            .as_deref()
            .map(TxKind::from_label)
            .unwrap_or(TxKind::Unknown);

        let (amount, token) = if tx.token_transfers.is_empty() {
            let lamports: i64 = tx.native_transfers.iter().map(|t| t.amount.abs()).sum();
            let token = (!tx.native_transfers.is_empty()).then(|| "SOL".to_string());
            (lamports as f64 / LAMPORTS_PER_SOL, token)
        } else {
            let amount = tx.token_transfers.iter().map(|t| t.token_amount.abs()).sum();
            let mint = &tx.token_transfers[0].mint;
            let token = symbol_for_mint(mint)
                .map(str::to_string)
                .unwrap_or_else(|| mint.clone());
            (amount, Some(token))
        };

        TransactionRecord {
            signature: tx.signature,
            block_time: tx.timestamp,
            kind,
            amount,
            token,
            pnl: None,
        }
    }
}

/// Helius enhanced-transactions API.
#[derive(Clone)]
pub struct HeliusProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl HeliusProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, HELIUS_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl HistoryProvider for HeliusProvider {
    fn name(&self) -> &str {
        "helius"
    }

    async fn fetch(&self, wallet: &WalletAddress) -> Result<Vec<TransactionRecord>> {
        let url = format!("{}/v0/addresses/{}/transactions", self.base_url, wallet);

        let response = self
            .client
            .get(&url)
            .query(&[("api-key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(anyhow!("Helius responded with {}: {}", status, body));
        }

        let transactions: Vec<HeliusTransaction> = response.json().await?;

        Ok(transactions.into_iter().map(TransactionRecord::from).collect())
    }
}
