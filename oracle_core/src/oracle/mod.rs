pub mod dependencies;
pub mod dto;
pub mod handler;
pub mod locks;

pub use dependencies::OracleDependencies;
pub use dto::{OracleStatus, WalletAnalysis};
pub use handler::WalletOracle;
pub use locks::{WalletGuard, WalletLocks};
