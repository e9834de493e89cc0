use serde::{Deserialize, Serialize};
use std::fmt;

use crate::tier::Tier;
use crate::wallet::WalletAddress;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftHolding {
    pub name: String,
    pub id: String,
    /// Collection floor in SOL, when known.
    #[serde(default)]
    pub floor: Option<f64>,
}

/// How the live conversation went, as reported by the call manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CallTone {
    Bullish,
    Bearish,
    Questioning,
    Heated,
    #[default]
    Neutral,
}

impl CallTone {
    /// Unrecognised labels read as neutral.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "bullish" => CallTone::Bullish,
            "bearish" => CallTone::Bearish,
            "questioning" => CallTone::Questioning,
            "heated" => CallTone::Heated,
            _ => CallTone::Neutral,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            CallTone::Bullish => "the caller was confident and pumped",
            CallTone::Bearish => "the caller was gloomy about their bags",
            CallTone::Questioning => "the caller kept asking questions and sounded unsure",
            CallTone::Heated => "the call got heated and argumentative",
            CallTone::Neutral => "the call was calm and matter-of-fact",
        }
    }
}

impl fmt::Display for CallTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CallTone::Bullish => "bullish",
            CallTone::Bearish => "bearish",
            CallTone::Questioning => "questioning",
            CallTone::Heated => "heated",
            CallTone::Neutral => "neutral",
        };
        write!(f, "{}", label)
    }
}

/// A live call waiting for its closing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExit {
    pub wallet: WalletAddress,
    pub tier: Tier,
    pub registered_at: i64,
}
