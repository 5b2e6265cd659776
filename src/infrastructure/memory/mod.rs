//! Memory Layer - In-Memory State Management
//!
//! 进程内共享的音色目录

mod voice_catalog;

pub use voice_catalog::InMemoryVoiceCatalog;
