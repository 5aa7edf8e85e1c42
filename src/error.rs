// error.rs - 错误类型
//! 统一的错误类型，警告类错误由调用方展示给用户

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("No front matter data found in {0}")]
    NoFrontMatter(PathBuf),

    #[error("Front matter must be a mapping: {0}")]
    InvalidFrontMatter(String),

    #[error("Content type not found: {0}")]
    ContentTypeNotFound(String),

    #[error("A content type with this name already exists: {0}")]
    ContentTypeExists(String),

    #[error("You didn't specify a name for the content type")]
    MissingName,

    #[error("File already exists: {0}")]
    FileExists(PathBuf),

    #[error("The content type actions are not available in this mode")]
    FeatureDisabled,

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type CmsResult<T> = Result<T, CmsError>;
