// content/draft.rs - 草稿状态

use serde_json::Value;

use crate::frontmatter::Record;
use crate::schema::{ContentType, DraftField, DraftKind, FieldType, DRAFT_LABEL, PUBLISHED_LABEL};

/// 计算记录的草稿状态
///
/// 取值优先用内容类型里的 `draft` 字段，其次用配置的草稿字段名。
/// 没有草稿配置或值为假时返回 None。
pub fn draft_status(
    data: &Record,
    content_type: &ContentType,
    draft_setting: Option<&DraftField>,
) -> Option<String> {
    let setting = draft_setting?;

    let value = match content_type.field_of_type(FieldType::Draft) {
        Some(field) => data.get(&field.name),
        None => data.get(&setting.name),
    }?;

    if !is_set(value) {
        return None;
    }

    Some(match setting.kind {
        DraftKind::Boolean => DRAFT_LABEL.to_string(),
        DraftKind::Choice => match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    })
}

fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// 布尔草稿的展示值：已设置 -> Draft，否则 Published
pub fn draft_label(data: &Record, content_type: &ContentType, draft_setting: Option<&DraftField>) -> Option<String> {
    match draft_setting {
        Some(setting) if setting.kind == DraftKind::Boolean => Some(
            draft_status(data, content_type, draft_setting).unwrap_or_else(|| PUBLISHED_LABEL.to_string()),
        ),
        _ => draft_status(data, content_type, draft_setting),
    }
}
