// schema/mod.rs - Schema 定义模块
//! 内容类型与字段描述的数据结构

mod content_type;
mod field;
pub mod fields;

pub use content_type::*;
pub use field::*;
pub use fields::*;
