pub mod dto;
pub mod exit;
pub mod intro;
pub mod prompt;
pub mod templates;

pub use dto::{CallTone, NftHolding, PendingExit};
pub use exit::ExitGenerator;
pub use intro::NarrativeGenerator;
