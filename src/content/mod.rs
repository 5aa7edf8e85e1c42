// content/mod.rs - 内容类型操作
//! 生成内容类型、补充缺失字段、设置内容类型、按内容类型创建内容

mod draft;
pub mod placeholder;
mod workflow;

pub use draft::*;
pub use placeholder::*;
pub use workflow::*;
