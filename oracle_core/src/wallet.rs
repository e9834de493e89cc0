use std::{fmt, sync::OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{OracleError, OracleResult};

static BASE58_ADDRESS: OnceLock<Regex> = OnceLock::new();

fn address_regex() -> &'static Regex {
    BASE58_ADDRESS.get_or_init(|| {
        Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{32,44}$").expect("static base58 pattern is valid")
    })
}

/// A validated base58 Solana account address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn parse(raw: &str) -> OracleResult<Self> {
        let trimmed = raw.trim();
        if address_regex().is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(OracleError::InvalidWallet(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `9Y7jX9zN...PqRs` style label for logs and prompts.
    pub fn short(&self) -> String {
        format!("{}...{}", &self.0[..8], &self.0[self.0.len() - 4..])
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for WalletAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
