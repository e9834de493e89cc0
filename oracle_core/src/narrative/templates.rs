use crate::metrics::WalletMetrics;
use crate::tier::Tier;

/// Spoken when no history could be found at all.
pub const MYSTERY_WALLET_SCRIPT: &str =
    "Mystery wallet. Let's write your origin story. Welcome to the prophecy.";

/// Deterministic per-tier intro. Doubles as the analysis script and as the
/// fallback whenever generation is unavailable.
pub fn tier_script(tier: Tier, metrics: &WalletMetrics) -> String {
    match tier {
        Tier::Oracle => format!(
            "You don't trade, you *speak* to the chain. {}% wins, {}% rugs. You're not an investor; you're a *prophecy*. {}",
            metrics.win_pct(),
            metrics.rug_pct(),
            if metrics.is_hot_streak {
                "Hot streak. Don't flop."
            } else {
                "Consistent. Intimidating."
            }
        ),
        Tier::Whale => format!(
            "Whale wallet. They're watching. You hold ${}+ worth. {} But you're here, and that matters.",
            metrics.volume_display(),
            if metrics.is_hot_streak {
                "Show us you ain't luck."
            } else {
                "Cold streak? Even whales bleed."
            }
        ),
        Tier::Steady => format!(
            "Clean book. {}% wins, low rug exposure. You actually *trade* instead of chase memes. {}",
            metrics.win_pct(),
            if metrics.is_hot_streak {
                "Hot week. Keep it up."
            } else if metrics.is_cold_streak {
                "Rough week, but the numbers show discipline."
            } else {
                "Steady as she goes."
            }
        ),
        Tier::Degen => format!(
            "Another rug chaser. {}% meme exposure, {}% rugs. How many times you gonna learn? {} Let's see if you survive this one.",
            metrics.meme_pct(),
            metrics.rug_pct(),
            if metrics.is_hot_streak {
                "But hey, today you're up."
            } else {
                "But you showed up anyway. That is something."
            }
        ),
        Tier::Newcomer => format!(
            "{} write your origin story. Only {} moves on the board. Welcome. {}",
            if metrics.tx_count < 3 {
                "First time? Let's"
            } else {
                "Mystery wallet. Let's"
            },
            metrics.tx_count,
            if metrics.is_hot_streak {
                "You're up today, nice."
            } else {
                "Let's build from here."
            }
        ),
    }
}

/// Closing line used when the generator is unavailable.
pub fn exit_fallback(tier: Tier) -> &'static str {
    match tier {
        Tier::Newcomer => "Welcome to the board. Come back when the chain knows your name.",
        Tier::Degen => "Careful out there. The next rug already has your name on it.",
        Tier::Steady => "Clean exit. The numbers respect you, and so do we.",
        Tier::Whale => "The whole board is watching your next move. Don't blink.",
        Tier::Oracle => "The prophecy continues. The chain remembers.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_wallet_script() {
        let script = tier_script(Tier::Newcomer, &WalletMetrics::empty());
        assert_eq!(
            script,
            "First time? Let's write your origin story. Only 0 moves on the board. Welcome. Let's build from here."
        );
    }

    #[test]
    fn test_scripts_use_metrics() {
        let metrics = WalletMetrics {
            meme_exposure: 0.45,
            rug_ratio: 0.25,
            ..WalletMetrics::empty()
        };
        let script = tier_script(Tier::Degen, &metrics);
        assert!(script.starts_with("Another rug chaser. 45.0% meme exposure, 25.0% rugs."));
        assert!(script.contains("you showed up anyway"));

        let metrics = WalletMetrics {
            total_volume: 75_000.0,
            is_hot_streak: true,
            ..WalletMetrics::empty()
        };
        let script = tier_script(Tier::Whale, &metrics);
        assert!(script.contains("$75000.00+"));
        assert!(script.contains("Show us you ain't luck."));
    }

    #[test]
    fn test_steady_streak_variants() {
        let cold = WalletMetrics {
            is_cold_streak: true,
            ..WalletMetrics::empty()
        };
        assert!(tier_script(Tier::Steady, &cold).ends_with("Rough week, but the numbers show discipline."));
        assert!(tier_script(Tier::Steady, &WalletMetrics::empty()).ends_with("Steady as she goes."));
    }

    #[test]
    fn test_every_tier_has_text() {
        for tier in Tier::ALL {
            assert!(!tier_script(tier, &WalletMetrics::empty()).is_empty());
            assert!(!exit_fallback(tier).is_empty());
        }
    }
}
