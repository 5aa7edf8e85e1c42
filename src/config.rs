// 配置模块 - 项目配置文件 (frontmatter.toml)
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CmsError, CmsResult};
use crate::schema::{ContentType, DraftField, DEFAULT_CONTENT_TYPE_NAME};

/// 默认配置文件路径
pub const CONFIG_FILE: &str = "./frontmatter.toml";

// ============== 配置结构体 ==============

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub features: FeatureConfig,
    /// 自定义占位符
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placeholders: Vec<CustomPlaceholder>,
    #[serde(default)]
    pub content_types: Vec<ContentType>,
    /// 配置文件所在目录，root 为空时作为工作区根目录（不写回文件）
    #[serde(skip)]
    pub config_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// 工作区根目录，为空时使用配置文件所在目录
    #[serde(default)]
    pub root: String,
    /// 静态资源目录（相对工作区根目录）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_folder: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default)]
    pub folders: Vec<ContentFolder>,
    /// chrono 格式串，用于 {{now}} 与日期字段
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_field: Option<DraftField>,
    /// 站点框架 (hugo, jekyll, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    /// 内容文件扩展名
    #[serde(default = "default_extensions")]
    pub supported_extensions: Vec<String>,
    /// 列出页面时忽略的 glob 模式
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentFolder {
    pub title: String,
    /// 相对路径按工作区根目录解析
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// 内容类型相关操作是否可用
    #[serde(default = "default_true")]
    pub content_type: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomPlaceholder {
    pub id: String,
    pub value: String,
}

fn default_date_format() -> String {
    "%Y-%m-%dT%H:%M:%S%:z".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "mdx".to_string(), "markdown".to_string()]
}

fn default_true() -> bool {
    true
}

// ============== 默认配置 ==============

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            folders: Vec::new(),
            date_format: default_date_format(),
            draft_field: Some(DraftField::default()),
            framework: None,
            supported_extensions: default_extensions(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self { content_type: true }
    }
}

// ============== 配置加载 ==============

impl AppConfig {
    /// 从指定文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CmsResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config: AppConfig = toml::from_str(&content)?;
        check_date_format(&config.content.date_format)?;

        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        config.config_dir = Some(parent.to_path_buf());
        debug!(path = %path.display(), "配置已加载");
        Ok(config)
    }

    /// 写回配置文件（内容类型更新后调用）
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> CmsResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)?;
        debug!(path = %path.as_ref().display(), "配置已保存");
        Ok(())
    }

    /// 生成默认配置文件
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> CmsResult<()> {
        let default_content = include_str!("../frontmatter.toml");
        fs::write(path, default_content)?;
        Ok(())
    }

    // ============== 路径 ==============

    /// 工作区根目录：root 为空时取配置文件所在目录，都没有时为 None
    pub fn workspace_root(&self) -> Option<PathBuf> {
        if self.workspace.root.is_empty() {
            self.config_dir.clone()
        } else {
            Some(PathBuf::from(normalize_path(&self.workspace.root)))
        }
    }

    /// 内容目录的绝对路径
    pub fn content_folder_path(&self, folder: &ContentFolder) -> PathBuf {
        let path = PathBuf::from(normalize_path(&folder.path));
        match self.workspace_root() {
            Some(root) if path.is_relative() => root.join(path),
            _ => path,
        }
    }

    pub fn content_folder_paths(&self) -> Vec<PathBuf> {
        self.content
            .folders
            .iter()
            .map(|f| self.content_folder_path(f))
            .collect()
    }

    // ============== 内容类型 ==============

    pub fn content_type(&self, name: &str) -> Option<&ContentType> {
        self.content_types.iter().find(|ct| ct.name == name)
    }

    /// 按名称查找内容类型，找不到时退回 default
    pub fn content_type_or_default(&self, name: Option<&str>) -> ContentType {
        name.and_then(|n| self.content_type(n))
            .or_else(|| self.content_type(DEFAULT_CONTENT_TYPE_NAME))
            .cloned()
            .unwrap_or_else(|| ContentType::new(DEFAULT_CONTENT_TYPE_NAME, Vec::new()))
    }

    pub fn content_type_names(&self) -> Vec<String> {
        self.content_types.iter().map(|ct| ct.name.clone()).collect()
    }

    pub fn is_jekyll(&self) -> bool {
        self.content
            .framework
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("jekyll"))
    }
}

/// 检查 chrono 格式串，含无法识别的说明符时报错
pub fn check_date_format(format: &str) -> CmsResult<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(CmsError::Config(format!("invalid date_format: {format}")));
    }
    Ok(())
}

/// Windows 路径统一为正斜杠
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
