//! 应用层 - 命令（写操作）
//!
//! 合成音频、派生音色

mod voice_commands;

pub mod handlers;

pub use voice_commands::*;
