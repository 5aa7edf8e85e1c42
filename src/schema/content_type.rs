// schema/content_type.rs - 内容类型定义

use serde::{Deserialize, Serialize};

use super::field::{Field, FieldType};
use super::fields::{DEFAULT_CONTENT_TYPE_NAME, FIELD_TYPE};

/// 内容类型 - 一类内容文件的 front matter 结构
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    pub name: String,
    /// 是否以 `<slug>/index.md` 的形式创建
    #[serde(default)]
    pub page_bundle: bool,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl ContentType {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            page_bundle: false,
            fields,
        }
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_CONTENT_TYPE_NAME
    }

    /// 查找第一个指定类型的字段
    pub fn field_of_type(&self, field_type: FieldType) -> Option<&Field> {
        self.fields.iter().find(|f| f.field_type == field_type)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// 追加隐藏的 `type` 字段，已存在时不做任何事
    pub fn ensure_type_field(&mut self) {
        if !self.has_field(FIELD_TYPE) {
            self.fields.push(
                Field {
                    title: None,
                    ..Field::new(FIELD_TYPE, FieldType::String)
                }
                .with_default(self.name.clone())
                .hidden(),
            );
        }
    }
}

/// 草稿字段的取值方式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DraftKind {
    Boolean,
    Choice,
}

/// 配置中的草稿字段
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DraftKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

impl Default for DraftField {
    fn default() -> Self {
        Self {
            name: "draft".to_string(),
            kind: DraftKind::Boolean,
            choices: None,
        }
    }
}
