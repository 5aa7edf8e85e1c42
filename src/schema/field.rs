// schema/field.rs - 字段描述
//! 内容类型中单个 front matter 键的描述

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 字段类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Tags,
    Categories,
    Choice,
    /// 对象数组，按第一个元素推断子字段
    Block,
    /// 嵌套对象
    Fields,
    Datetime,
    Draft,
    String,
    Number,
    Boolean,
    /// 图片路径（只在手写的内容类型中出现，推断不会生成）
    Image,
}

/// 字段描述
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    /// 显示名，推断时与 name 相同
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// 仅 choice 类型
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    /// 仅 block / fields 类型
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    /// image 字段是否允许多个值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,
}

impl Field {
    /// 创建一个 title 与 name 相同的字段
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        Self {
            title: Some(name.clone()),
            name,
            field_type,
            choices: None,
            fields: None,
            default: None,
            hidden: None,
            multiple: None,
        }
    }

    pub fn with_choices(mut self, choices: Vec<String>) -> Self {
        self.choices = Some(choices);
        self
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = Some(true);
        self
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple.unwrap_or(false)
    }

    /// 子字段（没有时为空切片）
    pub fn sub_fields(&self) -> &[Field] {
        self.fields.as_deref().unwrap_or(&[])
    }
}
