//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod bootstrap;
pub mod memory;

pub use bootstrap::{BootstrapError, Services};
pub use memory::InMemoryVoiceCatalog;
