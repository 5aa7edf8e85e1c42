// assets/mod.rs - 静态资源路径
//! 图片等资源在相对路径与绝对路径之间的转换

mod image;
mod resolver;

pub use image::*;
pub use resolver::*;
