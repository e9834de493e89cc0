use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One accepted intro line. `timestamp` is unix milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntroEntry {
    pub text: String,
    pub timestamp: i64,
}

impl IntroEntry {
    pub fn new(text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            text: text.into(),
            timestamp,
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.text.trim().to_lowercase() == text.trim().to_lowercase()
    }
}

/// Wallet address to its most recent intros, oldest first.
pub type IntroHistoryMap = HashMap<String, Vec<IntroEntry>>;
