use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::metrics::WalletMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskFlag {
    HighRugExposure,
    SevereDrawdown,
    ExtremeVolatility,
    MemeHeavy,
    ColdStreak,
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskFlag::HighRugExposure => "HIGH_RUG_EXPOSURE",
            RiskFlag::SevereDrawdown => "SEVERE_DRAWDOWN",
            RiskFlag::ExtremeVolatility => "EXTREME_VOLATILITY",
            RiskFlag::MemeHeavy => "MEME_HEAVY",
            RiskFlag::ColdStreak => "COLD_STREAK",
        };
        write!(f, "{}", label)
    }
}

pub fn risk_flags(metrics: &WalletMetrics) -> BTreeSet<RiskFlag> {
    let mut flags = BTreeSet::new();

    if metrics.rug_ratio > 0.4 {
        flags.insert(RiskFlag::HighRugExposure);
    }
    if metrics.max_drawdown < -70.0 {
        flags.insert(RiskFlag::SevereDrawdown);
    }
    if metrics.volatility > 50.0 {
        flags.insert(RiskFlag::ExtremeVolatility);
    }
    // meme exposure is a fraction, so 70%
    if metrics.meme_exposure > 0.7 {
        flags.insert(RiskFlag::MemeHeavy);
    }
    if metrics.is_cold_streak {
        flags.insert(RiskFlag::ColdStreak);
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_wallet_has_no_flags() {
        assert!(risk_flags(&WalletMetrics::empty()).is_empty());
    }

    #[test]
    fn test_flags_are_independent() {
        let metrics = WalletMetrics {
            rug_ratio: 0.41,
            max_drawdown: -70.5,
            volatility: 50.0,
            meme_exposure: 0.75,
            is_cold_streak: true,
            ..WalletMetrics::empty()
        };
        let flags = risk_flags(&metrics);

        assert!(flags.contains(&RiskFlag::HighRugExposure));
        assert!(flags.contains(&RiskFlag::SevereDrawdown));
        assert!(!flags.contains(&RiskFlag::ExtremeVolatility));
        assert!(flags.contains(&RiskFlag::MemeHeavy));
        assert!(flags.contains(&RiskFlag::ColdStreak));
        assert_eq!(flags.len(), 4);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let metrics = WalletMetrics {
            rug_ratio: 0.4,
            max_drawdown: -70.0,
            meme_exposure: 0.7,
            ..WalletMetrics::empty()
        };
        assert!(risk_flags(&metrics).is_empty());
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(
            serde_json::to_string(&RiskFlag::HighRugExposure).unwrap(),
            "\"HIGH_RUG_EXPOSURE\""
        );
        assert_eq!(RiskFlag::MemeHeavy.to_string(), "MEME_HEAVY");
    }
}
