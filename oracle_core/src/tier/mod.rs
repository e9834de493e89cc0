pub mod classifier;
pub mod dto;
pub mod risk;

pub use classifier::classify;
pub use dto::{Tier, Tone, VoiceProfile};
pub use risk::{risk_flags, RiskFlag};
