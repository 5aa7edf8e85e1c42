// src/lib.rs
pub mod assets;
pub mod config;
pub mod content;
pub mod dashboard;
pub mod error;
pub mod frontmatter;
pub mod infer;
pub mod prompt;
pub mod schema;

pub use assets::*;
pub use config::*;
pub use content::*;
pub use dashboard::*;
pub use error::*;
pub use frontmatter::*;
pub use infer::*;
pub use prompt::*;
pub use schema::*;
