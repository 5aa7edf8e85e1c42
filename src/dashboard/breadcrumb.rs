// dashboard/breadcrumb.rs - 媒体目录面包屑
//! 从工作区根目录逐级展开选中目录，只保留位于静态资源目录或内容目录之内的层级

use serde::Serialize;
use std::path::{Path, PathBuf};

/// 面包屑中的一级
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Crumb {
    pub path: PathBuf,
    pub label: String,
}

/// 计算面包屑
///
/// `static_folder` 相对于工作区根目录；目录本身等于静态资源目录时不显示。
pub fn breadcrumb(
    selected: Option<&Path>,
    workspace_root: &Path,
    static_folder: Option<&str>,
    content_folders: &[PathBuf],
) -> Vec<Crumb> {
    let Some(selected) = selected else {
        return Vec::new();
    };
    let Ok(relative) = selected.strip_prefix(workspace_root) else {
        return Vec::new();
    };

    let static_path = static_folder.map(|folder| workspace_root.join(folder));
    let mut crumbs = Vec::new();
    let mut current = workspace_root.to_path_buf();

    for part in relative.components() {
        current.push(part);
        if is_valid(&current, static_path.as_deref(), content_folders) {
            crumbs.push(Crumb {
                path: current.clone(),
                label: part.as_os_str().to_string_lossy().to_string(),
            });
        }
    }

    crumbs
}

fn is_valid(folder: &Path, static_path: Option<&Path>, content_folders: &[PathBuf]) -> bool {
    if let Some(static_path) = static_path {
        if folder == static_path {
            return false;
        }
        if folder.starts_with(static_path) {
            return true;
        }
    }

    content_folders
        .iter()
        .any(|content| folder != content.as_path() && folder.starts_with(content))
}
