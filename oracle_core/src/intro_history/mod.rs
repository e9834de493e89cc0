pub mod dto;
pub mod persistence;
pub mod storage;

pub use dto::{IntroEntry, IntroHistoryMap};
pub use persistence::{
    IntroPersistence, JsonFileIntroPersistence, MemoryIntroPersistence, SledIntroPersistence,
};
pub use storage::IntroHistoryStore;
