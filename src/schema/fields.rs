// schema/fields.rs - 字段名常量定义
//! 统一管理 front matter 中有特殊含义的键名，避免魔法字符串

/// 标签
pub const FIELD_TAG: &str = "tag";
pub const FIELD_TAGS: &str = "tags";
/// 分类
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_CATEGORIES: &str = "categories";
/// 草稿状态
pub const FIELD_DRAFT: &str = "draft";
/// slug 由文件名决定，不生成字段
pub const FIELD_SLUG: &str = "slug";
/// 标题
pub const FIELD_TITLE: &str = "title";
/// 内容类型名
pub const FIELD_TYPE: &str = "type";

/// 默认内容类型名
pub const DEFAULT_CONTENT_TYPE_NAME: &str = "default";

/// 布尔草稿字段的展示值
pub const DRAFT_LABEL: &str = "Draft";
pub const PUBLISHED_LABEL: &str = "Published";
