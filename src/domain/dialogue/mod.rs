//! Dialogue Context - 对白限界上下文
//!
//! 职责:
//! - 对白片段实体
//! - 基于字符偏移的原文截取

mod entities;

pub use entities::{slice_chars, DialogueSpan};
