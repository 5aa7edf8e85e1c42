// assets/image.rs - 图片字段处理
//! 把记录中的图片字段替换为预览信息（原值、绝对路径、预览 URL）。
//! 输入记录不被修改，结果是一份新记录。

use serde_json::{json, Value};
use std::path::{Path, PathBuf};

use super::resolver::AssetResolver;
use crate::config::normalize_path;
use crate::frontmatter::Record;
use crate::schema::{Field, FieldType};

/// 单个图片值的解析结果
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePreview {
    pub original: String,
    pub abs_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageValue {
    Single(ImagePreview),
    Multiple(Vec<ImagePreview>),
}

/// 默认预览 URL：file:// 链接
pub fn file_url(path: &Path) -> Option<String> {
    let normalized = normalize_path(&path.to_string_lossy());
    if normalized.starts_with('/') {
        Some(format!("file://{normalized}"))
    } else {
        Some(format!("file:///{normalized}"))
    }
}

/// 图片字段处理器
pub struct ImageProcessor<'a> {
    resolver: &'a AssetResolver,
    preview_mapper: Box<dyn Fn(&Path) -> Option<String> + Send + Sync>,
}

impl<'a> ImageProcessor<'a> {
    pub fn new(resolver: &'a AssetResolver) -> Self {
        Self {
            resolver,
            preview_mapper: Box::new(file_url),
        }
    }

    /// 设置预览 URL 生成方式（例如宿主的资源 URI）
    pub fn with_preview_mapper<F>(mut self, mapper: F) -> Self
    where
        F: Fn(&Path) -> Option<String> + Send + Sync + 'static,
    {
        self.preview_mapper = Box::new(mapper);
        self
    }

    /// 解析单值或多值图片字段；值的形状与字段不符时返回 None
    pub fn resolve_image_value(
        &self,
        field: &Field,
        value: &Value,
        referencing_file: &Path,
    ) -> Option<ImageValue> {
        if field.is_multiple() {
            let Value::Array(items) = value else {
                return None;
            };
            let previews = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => self.preview(s, referencing_file),
                    other => ImagePreview {
                        original: other.to_string(),
                        abs_path: None,
                    },
                })
                .collect();
            Some(ImageValue::Multiple(previews))
        } else {
            match value {
                Value::String(s) => Some(ImageValue::Single(self.preview(s, referencing_file))),
                _ => None,
            }
        }
    }

    /// 生成新记录：图片字段替换为预览，`fields` 类型的子对象递归处理
    pub fn process_image_fields(&self, record: &Record, fields: &[Field], referencing_file: &Path) -> Record {
        let mut processed = Record::new();

        for (key, value) in record {
            let field = fields.iter().find(|f| &f.name == key);
            let new_value = match (field, value) {
                (Some(f), v) if f.field_type == FieldType::Image && is_truthy(v) => {
                    self.image_override(f, v, referencing_file)
                }
                (Some(f), Value::Object(inner)) if f.field_type == FieldType::Fields => {
                    Value::Object(self.process_image_fields(inner, f.sub_fields(), referencing_file))
                }
                (_, v) => v.clone(),
            };
            processed.insert(key.clone(), new_value);
        }

        processed
    }

    fn preview(&self, original: &str, referencing_file: &Path) -> ImagePreview {
        ImagePreview {
            original: original.to_string(),
            abs_path: self.resolver.resolve_absolute(referencing_file, original),
        }
    }

    fn image_override(&self, field: &Field, value: &Value, referencing_file: &Path) -> Value {
        match self.resolve_image_value(field, value, referencing_file) {
            Some(ImageValue::Multiple(previews)) => Value::Array(
                previews
                    .iter()
                    .map(|p| self.preview_json(p).unwrap_or(Value::Null))
                    .collect(),
            ),
            // 单值未找到时保留原值
            Some(ImageValue::Single(preview)) => {
                self.preview_json(&preview).unwrap_or_else(|| value.clone())
            }
            None if field.is_multiple() => Value::Array(Vec::new()),
            None => Value::String(String::new()),
        }
    }

    fn preview_json(&self, preview: &ImagePreview) -> Option<Value> {
        let abs_path = preview.abs_path.as_ref()?;
        Some(json!({
            "original": preview.original,
            "absPath": abs_path.to_string_lossy(),
            "previewUrl": (self.preview_mapper)(abs_path),
        }))
    }
}

/// JS 风格的真值判断
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
