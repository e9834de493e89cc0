pub mod dto;
pub mod grok;
pub mod handler;
pub mod openai;

pub use dto::GenerationRequest;
pub use handler::{generate_bounded, TextGenerator};
