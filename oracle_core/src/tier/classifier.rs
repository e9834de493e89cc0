use crate::metrics::dto::{WalletMetrics, WHALE_VOLUME};
use crate::sentiment::Sentiment;
use crate::tier::dto::Tier;

/// First matching rule wins. The predicates overlap, so order matters,
/// and every comparison is strict.
pub fn classify(metrics: &WalletMetrics) -> Tier {
    if metrics.days_active >= 30
        && metrics.tx_count > 100
        && metrics.win_ratio > 0.55
        && metrics.x_sentiment == Sentiment::Viral
    {
        return Tier::Oracle;
    }

    if metrics.is_whale && metrics.total_volume > WHALE_VOLUME && metrics.tx_count > 50 {
        return Tier::Whale;
    }

    if metrics.win_ratio > 0.55 && metrics.tx_count > 20 && metrics.rug_ratio < 0.2 {
        return Tier::Steady;
    }

    if metrics.rug_ratio > 0.3 || metrics.win_ratio < 0.4 {
        return Tier::Degen;
    }

    Tier::Newcomer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> WalletMetrics {
        WalletMetrics::empty()
    }

    #[test]
    fn test_viral_veteran_is_oracle() {
        let metrics = WalletMetrics {
            days_active: 31,
            tx_count: 120,
            win_ratio: 0.60,
            x_sentiment: Sentiment::Viral,
            ..base()
        };
        assert_eq!(classify(&metrics), Tier::Oracle);
    }

    #[test]
    fn test_oracle_needs_viral_sentiment() {
        let metrics = WalletMetrics {
            days_active: 31,
            tx_count: 120,
            win_ratio: 0.60,
            x_sentiment: Sentiment::Bullish,
            ..base()
        };
        // falls through to the steady-trader rule
        assert_eq!(classify(&metrics), Tier::Steady);
    }

    #[test]
    fn test_oracle_day_boundary_is_inclusive() {
        let metrics = WalletMetrics {
            days_active: 30,
            tx_count: 101,
            win_ratio: 0.56,
            x_sentiment: Sentiment::Viral,
            ..base()
        };
        assert_eq!(classify(&metrics), Tier::Oracle);

        let metrics = WalletMetrics {
            days_active: 29,
            ..metrics
        };
        assert_ne!(classify(&metrics), Tier::Oracle);
    }

    #[test]
    fn test_whale_beats_steady() {
        let metrics = WalletMetrics {
            is_whale: true,
            total_volume: 75_000.0,
            tx_count: 60,
            win_ratio: 0.70,
            rug_ratio: 0.05,
            ..base()
        };
        assert_eq!(classify(&metrics), Tier::Whale);
    }

    #[test]
    fn test_whale_needs_activity() {
        let metrics = WalletMetrics {
            is_whale: true,
            total_volume: 75_000.0,
            tx_count: 50,
            ..base()
        };
        // perfect win ratio with no rugs, so the next rule takes it
        assert_eq!(classify(&metrics), Tier::Steady);
    }

    #[test]
    fn test_win_ratio_boundary_is_strict() {
        let metrics = WalletMetrics {
            win_ratio: 0.55,
            tx_count: 40,
            rug_ratio: 0.1,
            ..base()
        };
        assert_eq!(classify(&metrics), Tier::Newcomer);

        let metrics = WalletMetrics {
            win_ratio: 0.5500001,
            ..metrics
        };
        assert_eq!(classify(&metrics), Tier::Steady);
    }

    #[test]
    fn test_rug_exposure_is_degen() {
        let metrics = WalletMetrics {
            rug_ratio: 0.35,
            win_ratio: 0.50,
            ..base()
        };
        assert_eq!(classify(&metrics), Tier::Degen);
    }

    #[test]
    fn test_steady_checked_before_degen() {
        let metrics = WalletMetrics {
            rug_ratio: 0.19,
            win_ratio: 0.80,
            tx_count: 25,
            ..base()
        };
        assert_eq!(classify(&metrics), Tier::Steady);
    }

    #[test]
    fn test_low_win_ratio_is_degen() {
        let metrics = WalletMetrics {
            win_ratio: 0.39,
            tx_count: 5,
            ..base()
        };
        assert_eq!(classify(&metrics), Tier::Degen);

        let metrics = WalletMetrics {
            win_ratio: 0.40,
            ..metrics
        };
        assert_eq!(classify(&metrics), Tier::Newcomer);
    }

    #[test]
    fn test_empty_wallet_is_newcomer() {
        assert_eq!(classify(&WalletMetrics::empty()), Tier::Newcomer);
    }

    #[test]
    fn test_classify_is_total() {
        let ratios = [0.0, 0.19, 0.2, 0.3, 0.31, 0.39, 0.4, 0.55, 0.56, 1.0];
        let counts = [0, 20, 21, 50, 51, 100, 101];
        let days = [0, 29, 30, 365];

        for &win_ratio in &ratios {
            for &rug_ratio in &ratios {
                for &tx_count in &counts {
                    for &days_active in &days {
                        for sentiment in Sentiment::ALL {
                            for is_whale in [false, true] {
                                let metrics = WalletMetrics {
                                    win_ratio,
                                    rug_ratio,
                                    tx_count,
                                    days_active,
                                    is_whale,
                                    total_volume: if is_whale { 60_000.0 } else { 10.0 },
                                    x_sentiment: sentiment,
                                    ..base()
                                };
                                let tier = classify(&metrics);
                                assert!((1..=5).contains(&tier.level()));
                            }
                        }
                    }
                }
            }
        }
    }
}
