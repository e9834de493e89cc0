use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::history::dto::{TransactionRecord, TxKind};
use crate::history::handler::HistoryProvider;
use crate::wallet::WalletAddress;

const SIGNATURE_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Vec<SignatureInfo>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignatureInfo {
    signature: String,
    block_time: Option<i64>,
}

/// Solana JSON-RPC via a QuickNode endpoint. Only signatures and block
/// times are available, so every record is a zero-amount transfer.
#[derive(Clone)]
pub struct QuickNodeProvider {
    client: Client,
    url: String,
}

impl QuickNodeProvider {
    pub fn new(endpoint_key: &str) -> Self {
        Self::with_url(format!("https://{}.solana-mainnet.quiknode.pro/", endpoint_key))
    }

    pub fn with_url(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[async_trait]
impl HistoryProvider for QuickNodeProvider {
    fn name(&self) -> &str {
        "quicknode"
    }

    async fn fetch(&self, wallet: &WalletAddress) -> Result<Vec<TransactionRecord>> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getSignaturesForAddress",
            "params": [wallet.as_str(), { "limit": SIGNATURE_LIMIT }],
        });

        let response = self.client.post(&self.url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("QuickNode responded with {}", status));
        }

        let rpc: RpcResponse = response.json().await?;
        if let Some(error) = rpc.error {
            return Err(anyhow!("QuickNode RPC error: {}", error));
        }

        Ok(rpc
            .result
            .unwrap_or_default()
            .into_iter()
            .map(|info| TransactionRecord {
                signature: info.signature,
                block_time: info.block_time,
                kind: TxKind::Transfer,
                amount: 0.0,
                token: None,
                pnl: None,
            })
            .collect())
    }
}
