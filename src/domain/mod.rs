//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Character Context: 角色
//! - Dialogue Context: 对白归属
//! - Voice Context: 音色与合成参数

pub mod character;
pub mod dialogue;
pub mod voice;

// 共享的情绪标签
mod emotion;

pub use emotion::Emotion;
