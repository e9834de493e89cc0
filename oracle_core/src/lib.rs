pub mod ai;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod intro_history;
pub mod metrics;
pub mod narrative;
pub mod oracle;
pub mod sentiment;
pub mod tier;
pub mod wallet;

pub use error::{OracleError, OracleResult};
pub use oracle::handler::WalletOracle;
