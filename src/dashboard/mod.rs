// dashboard/mod.rs - 面板数据
//! 面包屑导航与页面列表

mod breadcrumb;
mod pages;

pub use breadcrumb::*;
pub use pages::*;
