pub mod calculator;
pub mod dto;
pub mod helpers;

pub use calculator::MetricsCalculator;
pub use dto::WalletMetrics;
