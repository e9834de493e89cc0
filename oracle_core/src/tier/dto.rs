use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::OracleError;

/// Narrative intensity, ordered from newcomer (1) to oracle (5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Tier {
    Newcomer = 1,
    Degen = 2,
    Steady = 3,
    Whale = 4,
    Oracle = 5,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Newcomer,
        Tier::Degen,
        Tier::Steady,
        Tier::Whale,
        Tier::Oracle,
    ];

    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Tier::Newcomer),
            2 => Some(Tier::Degen),
            3 => Some(Tier::Steady),
            4 => Some(Tier::Whale),
            5 => Some(Tier::Oracle),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tier::Newcomer => "Noob Gatekeeper",
            Tier::Degen => "Degen Goblin",
            Tier::Steady => "Steady Trader",
            Tier::Whale => "Whale Whisperer",
            Tier::Oracle => "Oracle",
        }
    }

    /// Tone the intro prompt asks the model for.
    pub fn intro_tone(self) -> &'static str {
        match self {
            Tier::Newcomer => "curious/welcoming",
            Tier::Degen => "brutal roast",
            Tier::Steady => "respect",
            Tier::Whale => "awe/pressure",
            Tier::Oracle => "ritual/reverence",
        }
    }

    /// What the closing line should do for this tier.
    pub fn exit_archetype(self) -> &'static str {
        match self {
            Tier::Newcomer => "encourage",
            Tier::Degen => "warn",
            Tier::Steady => "respect",
            Tier::Whale => "pressure",
            Tier::Oracle => "reverence",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Tier::Newcomer => Tone::Gentle,
            Tier::Degen => Tone::Roast,
            Tier::Steady => Tone::Respect,
            Tier::Whale => Tone::Awe,
            Tier::Oracle => Tone::Ritual,
        }
    }

    pub fn voice(self) -> VoiceProfile {
        let (pitch, speed, effect, description) = match self {
            Tier::Newcomer => ("low", "slow", "gentle", "Calm, welcoming"),
            Tier::Degen => ("medium", "fast", "sharp", "Brutal roast"),
            Tier::Steady => ("medium", "medium", "clean", "Respect"),
            Tier::Whale => ("high", "medium", "awe", "Awe + pressure"),
            Tier::Oracle => ("deep", "slow", "ritual", "Deep, echoing ritual"),
        };

        VoiceProfile {
            pitch: pitch.to_string(),
            speed: speed.to_string(),
            effect: effect.to_string(),
            description: description.to_string(),
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.level()
    }
}

impl TryFrom<u8> for Tier {
    type Error = OracleError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Tier::from_level(level).ok_or_else(|| OracleError::Config(format!("Unknown tier: {}", level)))
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tier {} ({})", self.level(), self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Gentle,
    Roast,
    Respect,
    Awe,
    Ritual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub pitch: String,
    pub speed: String,
    pub effect: String,
    pub description: String,
}
