use crate::ai::GenerationRequest;
use crate::config::RoastLevel;
use crate::metrics::dto::{WalletMetrics, WHALE_VOLUME};
use crate::metrics::helpers::money;
use crate::narrative::dto::{CallTone, NftHolding};
use crate::tier::Tier;
use crate::wallet::WalletAddress;

pub const INTRO_WORD_LIMIT: usize = 120;
pub const EXIT_WORD_LIMIT: usize = 50;

const ORACLE_PERSONA: &str = "You are the Wallet Oracle, the voice of a live crypto call-in show. \
You read a caller's on-chain record and speak one short, punchy monologue that will be read aloud by a text-to-speech voice. \
Plain text only: no lists, no hashtags, no emojis, no stage directions.";

pub fn roast_intensity(level: RoastLevel) -> &'static str {
    match level {
        RoastLevel::Mild => "playful teasing, never mean",
        RoastLevel::Medium => "sharp jokes, but keep it friendly",
        RoastLevel::Fire => "no mercy: full roast, savage but never hateful",
    }
}

/// Plain-text digest of the wallet handed to the model as grounding.
pub fn build_data_dump(
    wallet: &WalletAddress,
    metrics: &WalletMetrics,
    tier: Tier,
    nfts: Option<&[NftHolding]>,
) -> String {
    let mut lines = vec![
        format!("WALLET: {}", wallet.short()),
        format!("TIER: {}", tier),
        String::new(),
        "TRADING SUMMARY".to_string(),
        format!("- Transactions: {}", metrics.tx_count),
        format!("- Volume: ${}", metrics.volume_display()),
        format!("- Win ratio: {}%", metrics.win_pct()),
        format!("- Total PnL: ${}", metrics.pnl_display()),
        format!("- Max drawdown: {}", money(metrics.max_drawdown)),
    ];

    if metrics.is_hot_streak {
        lines.push(format!("- Streak: HOT, +${} over the last 7 days", money(metrics.recent_pnl)));
    } else if metrics.is_cold_streak {
        lines.push(format!("- Streak: COLD, ${} over the last 7 days", money(metrics.recent_pnl)));
    }

    if metrics.rug_ratio > 0.2 {
        lines.push(String::new());
        lines.push("RUG EXPOSURE".to_string());
        lines.push(format!("- {}% of trades lost more than 50", metrics.rug_pct()));
    }

    if let Some(nfts) = nfts.filter(|nfts| !nfts.is_empty()) {
        lines.push(String::new());
        lines.push("NFT HOLDINGS".to_string());
        lines.extend(nfts.iter().map(|nft| match nft.floor {
            Some(floor) => format!("- {} #{} (floor {} SOL)", nft.name, nft.id, money(floor)),
            None => format!("- {} #{}", nft.name, nft.id),
        }));
    }

    if metrics.is_whale {
        lines.push(String::new());
        lines.push(format!("WHALE: lifetime volume above ${}", money(WHALE_VOLUME)));
    }

    lines.push(String::new());
    lines.push(format!("SOCIAL SENTIMENT: {}", metrics.x_sentiment));
    lines.push(format!("DAYS ACTIVE: {}", metrics.days_active));
    lines.push(format!("MEME EXPOSURE: {}%", metrics.meme_pct()));

    lines.join("\n")
}

/// `retry` asks the model to steer away from what it said last time.
pub fn intro_request(
    wallet: &WalletAddress,
    tier: Tier,
    data_dump: &str,
    roast_level: RoastLevel,
    retry: bool,
) -> GenerationRequest {
    let mut input = format!(
        "Caller wallet: {}\nTier {} ({}). Tone: {}.\nRoast intensity: {}.\n\n{}\n\n\
Write the intro for this caller in at most {} words. Frame it for a tier {} wallet and use at least two real numbers from the data.",
        wallet.short(),
        tier.level(),
        tier.title(),
        tier.intro_tone(),
        roast_intensity(roast_level),
        data_dump,
        INTRO_WORD_LIMIT,
        tier.level(),
    );

    if retry {
        input.push_str(
            "\n\nThis caller heard a very similar intro in the last hour. Make it different: new opening, new angle, new punchline.",
        );
    }

    GenerationRequest::new(ORACLE_PERSONA, input)
        .max_output_tokens(300)
        .temperature(if retry { 1.0 } else { 0.9 })
}

pub fn exit_request(
    wallet: &WalletAddress,
    tier: Tier,
    tone: CallTone,
    roast_level: RoastLevel,
) -> GenerationRequest {
    let input = format!(
        "The call with {} is ending. Tier {} ({}). How it went: {} ({}).\n\
Closing archetype: {}. Roast intensity: {}.\n\
Write one closing line of at most {} words.",
        wallet.short(),
        tier.level(),
        tier.title(),
        tone,
        tone.describe(),
        tier.exit_archetype(),
        roast_intensity(roast_level),
        EXIT_WORD_LIMIT,
    );

    GenerationRequest::new(ORACLE_PERSONA, input).max_output_tokens(120)
}
