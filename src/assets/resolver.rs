// assets/resolver.rs - 资源路径解析
//! 相对路径 -> 绝对路径：依次尝试 静态资源目录、引用文件所在目录、工作区根目录，
//! 取第一个存在的候选。每次调用都重新检查文件系统，不做缓存。

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{AppConfig, normalize_path};

/// 资源路径解析器
#[derive(Debug, Clone, Default)]
pub struct AssetResolver {
    workspace_root: Option<PathBuf>,
    static_folder: Option<String>,
}

impl AssetResolver {
    pub fn new(workspace_root: Option<PathBuf>, static_folder: Option<String>) -> Self {
        Self {
            workspace_root: workspace_root
                .map(|root| PathBuf::from(normalize_path(&root.to_string_lossy()))),
            static_folder,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.workspace_root(), config.workspace.static_folder.clone())
    }

    /// 静态资源目录；未配置 static_folder 时等于工作区根目录
    pub fn static_base(&self) -> Option<PathBuf> {
        let root = self.workspace_root.as_ref()?;
        Some(match self.static_folder.as_deref() {
            Some(folder) => root.join(folder),
            None => root.clone(),
        })
    }

    /// 按优先级排列的候选路径
    pub fn candidates(&self, referencing_file: &Path, relative_ref: &str) -> Vec<PathBuf> {
        let relative = relative_ref.trim_start_matches(['/', '\\']);
        let mut candidates = Vec::with_capacity(3);

        if let Some(static_base) = self.static_base() {
            candidates.push(static_base.join(relative));
        }
        if let Some(dir) = referencing_file.parent() {
            candidates.push(dir.join(relative));
        }
        if let Some(root) = &self.workspace_root {
            candidates.push(root.join(relative));
        }

        candidates
    }

    /// 返回第一个存在的候选路径
    pub fn resolve_absolute(&self, referencing_file: &Path, relative_ref: &str) -> Option<PathBuf> {
        let found = self
            .candidates(referencing_file, relative_ref)
            .into_iter()
            .find(|candidate| candidate.exists());

        if found.is_none() {
            debug!(reference = relative_ref, "资源路径未找到");
        }
        found
    }

    /// 绝对路径 -> 相对路径
    pub fn to_relative(&self, absolute_ref: &str) -> String {
        let static_base = self.static_base().map(|p| p.to_string_lossy().to_string());
        let root = self
            .workspace_root
            .as_ref()
            .map(|p| p.to_string_lossy().to_string());
        to_relative(absolute_ref, static_base.as_deref(), root.as_deref())
    }
}

/// 去掉已知的目录前缀：先静态资源目录，再工作区根目录，都不匹配则原样返回
pub fn to_relative(absolute_ref: &str, static_base: Option<&str>, workspace_root: Option<&str>) -> String {
    if absolute_ref.is_empty() {
        return String::new();
    }

    let normalized = normalize_path(absolute_ref);
    for base in [static_base, workspace_root].into_iter().flatten() {
        if let Some(rest) = strip_base(&normalized, &normalize_path(base)) {
            return rest.to_string();
        }
    }

    absolute_ref.to_string()
}

/// 前缀必须落在路径分隔处
fn strip_base<'a>(path: &'a str, base: &str) -> Option<&'a str> {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return None;
    }
    let rest = path.strip_prefix(base)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest.trim_start_matches('/'))
    } else {
        None
    }
}
