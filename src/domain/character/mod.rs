//! Character Context - 角色限界上下文
//!
//! 职责:
//! - 角色实体（一次分析范围内）
//! - 性别等值对象

mod entities;
mod value_objects;

pub use entities::Character;
pub use value_objects::Gender;
