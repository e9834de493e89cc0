pub mod dto;
pub mod handler;

pub use dto::Sentiment;
pub use handler::{GrokSentiment, SeededSentiment, SentimentSource};
