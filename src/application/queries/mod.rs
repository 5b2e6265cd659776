//! 应用层 - 查询（读操作）
//!
//! 音色目录查询与音色推荐

mod voice_queries;

pub mod handlers;

pub use voice_queries::*;
