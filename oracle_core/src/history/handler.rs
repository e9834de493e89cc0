use std::{sync::Arc, time::Duration};

use anyhow::Result;
use async_trait::async_trait;

use crate::history::dto::TransactionRecord;
use crate::history::synthetic::SyntheticHistory;
use crate::wallet::WalletAddress;

#[async_trait]
pub trait HistoryProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, wallet: &WalletAddress) -> Result<Vec<TransactionRecord>>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryOutcome {
    Live {
        provider: String,
        records: Vec<TransactionRecord>,
    },
    Synthetic(Vec<TransactionRecord>),
    Unavailable,
}

impl HistoryOutcome {
    pub fn records(&self) -> Option<&[TransactionRecord]> {
        match self {
            HistoryOutcome::Live { records, .. } => Some(records),
            HistoryOutcome::Synthetic(records) => Some(records),
            HistoryOutcome::Unavailable => None,
        }
    }

    pub fn source(&self) -> &str {
        match self {
            HistoryOutcome::Live { provider, .. } => provider,
            HistoryOutcome::Synthetic(_) => "synthetic",
            HistoryOutcome::Unavailable => "unavailable",
        }
    }
}

/// Providers in preference order, ending in the synthetic generator.
#[derive(Clone)]
pub struct HistoryChain {
    providers: Vec<Arc<dyn HistoryProvider>>,
    synthetic: Option<SyntheticHistory>,
    timeout: Duration,
}

impl HistoryChain {
    pub fn new(
        providers: Vec<Arc<dyn HistoryProvider>>,
        synthetic: Option<SyntheticHistory>,
        timeout: Duration,
    ) -> Self {
        Self {
            providers,
            synthetic,
            timeout,
        }
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn has_synthetic(&self) -> bool {
        self.synthetic.is_some()
    }

    pub async fn try_fetch(
        &self,
        provider: &dyn HistoryProvider,
        wallet: &WalletAddress,
    ) -> Option<Vec<TransactionRecord>> {
        match tokio::time::timeout(self.timeout, provider.fetch(wallet)).await {
            Ok(Ok(records)) => Some(records),
            Ok(Err(e)) => {
                log::warn!("{} history fetch failed for {}: {}", provider.name(), wallet, e);
                None
            }
            Err(_) => {
                log::warn!(
                    "{} history fetch timed out after {:?} for {}",
                    provider.name(),
                    self.timeout,
                    wallet
                );
                None
            }
        }
    }

    pub async fn fetch(&self, wallet: &WalletAddress) -> HistoryOutcome {
        for provider in &self.providers {
            if let Some(records) = self.try_fetch(provider.as_ref(), wallet).await {
                log::debug!(
                    "Fetched {} transactions for {} from {}",
                    records.len(),
                    wallet,
                    provider.name()
                );
                return HistoryOutcome::Live {
                    provider: provider.name().to_string(),
                    records,
                };
            }
        }

        match &self.synthetic {
            Some(synthetic) => {
                log::info!("All history providers unavailable for {}, using synthetic history", wallet);
                HistoryOutcome::Synthetic(synthetic.generate(wallet))
            }
            None => HistoryOutcome::Unavailable,
        }
    }
}
