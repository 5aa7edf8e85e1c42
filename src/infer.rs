// infer.rs - 字段推断
//! 根据一份示例 front matter 推断内容类型的字段
//!
//! 判断顺序：
//! 1. 非空数组且首元素为字符串 -> tags / categories / choice
//! 2. 非空数组且首元素为对象 -> block（按首元素递归）
//! 3. 对象 -> fields（递归）
//! 4. 其余走标量分支：日期 -> datetime，键名 draft -> draft，
//!    键名 slug -> 跳过，否则按值类型 string / number / boolean
//!
//! 日期判断在键名判断之前，所以值为日期的 `draft` 会被识别成 datetime。

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::frontmatter::Record;
use crate::schema::{
    Field, FieldType, FIELD_CATEGORIES, FIELD_CATEGORY, FIELD_DRAFT, FIELD_SLUG, FIELD_TAG,
    FIELD_TAGS,
};

/// 无时区的日期时间格式
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// 纯日期格式（%B 同时接受月份全称与缩写）
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%d %B %Y"];

/// 只有年月，按当月 1 日解析
const MONTH_FORMATS: &[&str] = &["%Y-%m", "%Y/%m", "%B %Y"];

/// 字段推断器
#[derive(Debug, Clone, Default)]
pub struct FieldInferencer {
    /// 额外识别的日期格式（项目配置的 date_format）
    date_format: Option<String>,
}

impl FieldInferencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    /// 为 record 中尚未出现在 existing 里的键生成字段，追加后返回
    pub fn infer(&self, record: &Record, mut existing: Vec<Field>) -> Vec<Field> {
        for (name, value) in record {
            if existing.iter().any(|f| &f.name == name) {
                continue;
            }
            if let Some(field) = self.classify(name, value) {
                existing.push(field);
            }
        }
        existing
    }

    fn classify(&self, name: &str, value: &Value) -> Option<Field> {
        match value {
            Value::Array(items) => match items.first() {
                Some(Value::String(_)) => Some(self.string_list_field(name, items)),
                Some(Value::Object(first)) => {
                    Some(Field::new(name, FieldType::Block).with_fields(self.infer(first, Vec::new())))
                }
                _ => self.scalar_field(name, value),
            },
            Value::Object(map) => {
                Some(Field::new(name, FieldType::Fields).with_fields(self.infer(map, Vec::new())))
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                self.scalar_field(name, value)
            }
        }
    }

    fn string_list_field(&self, name: &str, items: &[Value]) -> Field {
        let key = name.to_lowercase();
        if key == FIELD_TAG || key == FIELD_TAGS {
            Field::new(name, FieldType::Tags)
        } else if key == FIELD_CATEGORY || key == FIELD_CATEGORIES {
            Field::new(name, FieldType::Categories)
        } else {
            let choices = items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            Field::new(name, FieldType::Choice).with_choices(choices)
        }
    }

    fn scalar_field(&self, name: &str, value: &Value) -> Option<Field> {
        if self.is_date(value) {
            return Some(Field::new(name, FieldType::Datetime));
        }

        let key = name.to_lowercase();
        if key == FIELD_DRAFT {
            return Some(Field::new(name, FieldType::Draft));
        }
        if key == FIELD_SLUG {
            return None;
        }

        let field_type = match value {
            Value::Bool(_) => FieldType::Boolean,
            Value::Number(_) => FieldType::Number,
            Value::Null | Value::String(_) | Value::Array(_) | Value::Object(_) => FieldType::String,
        };
        Some(Field::new(name, field_type))
    }

    /// 只有字符串可能是日期
    fn is_date(&self, value: &Value) -> bool {
        match value {
            Value::String(s) => self.parse_date(s.trim()),
            _ => false,
        }
    }

    fn parse_date(&self, s: &str) -> bool {
        if s.is_empty() {
            return false;
        }
        if DateTime::parse_from_rfc3339(s).is_ok() || DateTime::parse_from_rfc2822(s).is_ok() {
            return true;
        }
        if DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
        {
            return true;
        }
        if DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
        {
            return true;
        }
        if MONTH_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(&format!("{s} 1"), &format!("{fmt} %d")).is_ok())
        {
            return true;
        }

        match self.date_format.as_deref() {
            Some(fmt) => {
                DateTime::parse_from_str(s, fmt).is_ok()
                    || NaiveDateTime::parse_from_str(s, fmt).is_ok()
                    || NaiveDate::parse_from_str(s, fmt).is_ok()
            }
            None => false,
        }
    }
}

/// 使用默认推断器
pub fn infer_fields(record: &Record, existing: Vec<Field>) -> Vec<Field> {
    FieldInferencer::new().infer(record, existing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn summary(fields: &[Field]) -> Vec<(&str, FieldType)> {
        fields.iter().map(|f| (f.name.as_str(), f.field_type)).collect()
    }

    #[test]
    fn test_tags_number_boolean() {
        let fields = infer_fields(
            &record(json!({ "tags": ["a", "b"], "count": 3, "published": true })),
            Vec::new(),
        );
        assert_eq!(
            summary(&fields),
            vec![
                ("tags", FieldType::Tags),
                ("count", FieldType::Number),
                ("published", FieldType::Boolean),
            ]
        );
        assert!(fields.iter().all(|f| f.title.as_deref() == Some(f.name.as_str())));
    }

    #[test]
    fn test_flat_record_keeps_key_order() {
        let fields = infer_fields(
            &record(json!({ "zeta": "z", "alpha": 1, "beta": false, "gamma": "g" })),
            Vec::new(),
        );
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_idempotent_with_existing_fields() {
        let data = record(json!({
            "title": "Hello",
            "tags": ["x"],
            "author": { "name": "Ann", "age": 30 },
            "sections": [{ "heading": "One" }]
        }));
        let first = infer_fields(&data, Vec::new());
        let second = infer_fields(&data, first.clone());
        assert_eq!(first, second);
    }

    #[test]
    fn test_only_missing_fields_are_appended() {
        let existing = vec![Field::new("title", FieldType::Image)];
        let fields = infer_fields(&record(json!({ "title": "x", "extra": "y" })), existing);
        assert_eq!(
            summary(&fields),
            vec![("title", FieldType::Image), ("extra", FieldType::String)]
        );
    }

    #[test]
    fn test_slug_is_skipped() {
        let fields = infer_fields(&record(json!({ "Slug": "my-post", "slug": 12 })), Vec::new());
        assert!(fields.is_empty());
    }

    #[test]
    fn test_categories_and_choice() {
        let fields = infer_fields(
            &record(json!({ "Category": ["dev"], "Tag": ["t"], "colors": ["red", "blue"] })),
            Vec::new(),
        );
        assert_eq!(fields[0].field_type, FieldType::Categories);
        assert_eq!(fields[1].field_type, FieldType::Tags);
        assert_eq!(fields[2].field_type, FieldType::Choice);
        assert_eq!(
            fields[2].choices,
            Some(vec!["red".to_string(), "blue".to_string()])
        );
        assert!(fields[0].choices.is_none());
    }

    #[test]
    fn test_block_uses_first_element_only() {
        let fields = infer_fields(
            &record(json!({ "links": [{ "url": "https://a" }, { "label": "ignored" }] })),
            Vec::new(),
        );
        assert_eq!(fields[0].field_type, FieldType::Block);
        assert_eq!(summary(fields[0].sub_fields()), vec![("url", FieldType::String)]);
    }

    #[test]
    fn test_nested_object_becomes_fields() {
        let fields = infer_fields(
            &record(json!({ "seo": { "noindex": false, "meta": { "description": "d" } } })),
            Vec::new(),
        );
        let seo = &fields[0];
        assert_eq!(seo.field_type, FieldType::Fields);
        assert_eq!(
            summary(seo.sub_fields()),
            vec![("noindex", FieldType::Boolean), ("meta", FieldType::Fields)]
        );
        assert_eq!(
            summary(seo.sub_fields()[1].sub_fields()),
            vec![("description", FieldType::String)]
        );
    }

    #[test]
    fn test_dates_are_detected() {
        let fields = infer_fields(
            &record(json!({
                "date": "2024-03-01",
                "lastmod": "2024-03-01T10:20:30Z",
                "updated": "2024-03-01 10:20:30",
                "title": "Not a date 1"
            })),
            Vec::new(),
        );
        assert_eq!(
            summary(&fields),
            vec![
                ("date", FieldType::Datetime),
                ("lastmod", FieldType::Datetime),
                ("updated", FieldType::Datetime),
                ("title", FieldType::String),
            ]
        );
    }

    #[test]
    fn test_month_and_long_form_dates() {
        let data = record(json!({
            "month": "2024-03",
            "long": "March 7, 2024",
            "short": "Mar 7, 2024",
            "version": "1.2",
            "year": "2024"
        }));
        let fields = infer_fields(&data, Vec::new());
        assert_eq!(
            summary(&fields),
            vec![
                ("month", FieldType::Datetime),
                ("long", FieldType::Datetime),
                ("short", FieldType::Datetime),
                ("version", FieldType::String),
                ("year", FieldType::String),
            ]
        );
    }

    #[test]
    fn test_draft_named_date_is_datetime() {
        let fields = infer_fields(&record(json!({ "draft": "2024-01-01" })), Vec::new());
        assert_eq!(fields[0].field_type, FieldType::Datetime);

        let fields = infer_fields(&record(json!({ "Draft": true })), Vec::new());
        assert_eq!(fields[0].field_type, FieldType::Draft);
    }

    #[test]
    fn test_configured_date_format() {
        let data = record(json!({ "published": "01.02.2024" }));
        assert_eq!(infer_fields(&data, Vec::new())[0].field_type, FieldType::String);

        let inferencer = FieldInferencer::new().with_date_format("%d.%m.%Y");
        assert_eq!(inferencer.infer(&data, Vec::new())[0].field_type, FieldType::Datetime);
    }

    #[test]
    fn test_odd_values_fall_through_to_scalar_branch() {
        let fields = infer_fields(
            &record(json!({ "empty": [], "numbers": [1, 2], "nothing": null, "draft": null })),
            Vec::new(),
        );
        assert_eq!(
            summary(&fields),
            vec![
                ("empty", FieldType::String),
                ("numbers", FieldType::String),
                ("nothing", FieldType::String),
                ("draft", FieldType::Draft),
            ]
        );
    }
}
