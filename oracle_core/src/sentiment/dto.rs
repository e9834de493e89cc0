use serde::{Deserialize, Serialize};
use std::fmt;

/// Social buzz around a wallet, as reported by an external source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    #[default]
    Neutral,
    Bearish,
    Viral,
    Noisy,
}

impl Sentiment {
    pub const ALL: [Sentiment; 5] = [
        Sentiment::Bullish,
        Sentiment::Neutral,
        Sentiment::Bearish,
        Sentiment::Viral,
        Sentiment::Noisy,
    ];

    /// First sentiment word found in free text, e.g. a model reply.
    pub fn from_text(text: &str) -> Option<Self> {
        let lowered = text.to_lowercase();
        lowered
            .split(|c: char| !c.is_ascii_alphabetic())
            .find_map(|word| match word {
                "bullish" => Some(Sentiment::Bullish),
                "neutral" => Some(Sentiment::Neutral),
                "bearish" => Some(Sentiment::Bearish),
                "viral" => Some(Sentiment::Viral),
                "noisy" => Some(Sentiment::Noisy),
                _ => None,
            })
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Bullish => write!(f, "bullish"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Bearish => write!(f, "bearish"),
            Sentiment::Viral => write!(f, "viral"),
            Sentiment::Noisy => write!(f, "noisy"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        assert_eq!(Sentiment::from_text("VIRAL"), Some(Sentiment::Viral));
        assert_eq!(Sentiment::from_text("Sentiment: bearish."), Some(Sentiment::Bearish));
        assert_eq!(Sentiment::from_text("no idea"), None);
    }
}
