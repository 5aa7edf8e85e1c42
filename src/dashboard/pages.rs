// dashboard/pages.rs - 页面列表
//! 遍历所有内容目录，读取每个内容文件的 front matter

use glob::Pattern;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::AppConfig;
use crate::content::draft_label;
use crate::frontmatter::FrontMatter;
use crate::schema::{FIELD_TITLE, FIELD_TYPE};

/// 页面条目
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEntry {
    pub path: PathBuf,
    /// 所属内容目录的标题
    pub folder: String,
    pub title: Option<String>,
    pub content_type: String,
    pub draft: Option<String>,
}

/// 排除规则匹配器（glob 模式）
pub struct ExcludeMatcher {
    patterns: Vec<Pattern>,
}

impl ExcludeMatcher {
    pub fn new(patterns: &[String]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!(pattern = %p, error = %e, "忽略无效的排除模式");
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    /// 相对路径或绝对路径命中任一模式即排除
    pub fn is_excluded(&self, path: &Path, relative: &Path) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_path(relative) || p.matches_path(path))
    }
}

/// 列出所有内容目录下的页面，按路径排序
pub fn list_pages(config: &AppConfig) -> Vec<PageEntry> {
    let matcher = ExcludeMatcher::new(&config.content.exclude_patterns);
    let mut pages = Vec::new();

    for folder in &config.content.folders {
        let root = config.content_folder_path(folder);
        if !root.is_dir() {
            warn!(folder = %root.display(), "内容目录不存在");
            continue;
        }

        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "遍历内容目录失败");
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !is_content_file(path, &config.content.supported_extensions) {
                continue;
            }

            let relative = path.strip_prefix(&root).unwrap_or(path);
            if matcher.is_excluded(path, relative) {
                debug!(path = %path.display(), "已排除");
                continue;
            }

            match FrontMatter::read(path) {
                Ok(fm) => pages.push(page_entry(config, &folder.title, path, &fm)),
                Err(e) => warn!(path = %path.display(), error = %e, "读取 front matter 失败"),
            }
        }
    }

    pages
}

fn is_content_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)))
}

fn page_entry(config: &AppConfig, folder: &str, path: &Path, fm: &FrontMatter) -> PageEntry {
    let content_type = config.content_type_or_default(fm.get_str(FIELD_TYPE));
    PageEntry {
        path: path.to_path_buf(),
        folder: folder.to_string(),
        title: fm.data.get(FIELD_TITLE).and_then(Value::as_str).map(str::to_string),
        draft: draft_label(&fm.data, &content_type, config.content.draft_field.as_ref()),
        content_type: content_type.name,
    }
}
