//! Composition root tying the tier list workspace to its storage.
//! 將排名清單工作區與持久化儲存組合在一起的進入點。

pub mod config;
pub mod engine;
pub mod event;

pub use config::EngineConfig;
pub use engine::{AutoSaveOutcome, Engine, EngineError};
pub use event::Event;
