pub mod dto;
pub mod handler;
pub mod helius;
pub mod quicknode;
pub mod synthetic;

pub use dto::{TransactionRecord, TxKind};
pub use handler::{HistoryChain, HistoryOutcome, HistoryProvider};
