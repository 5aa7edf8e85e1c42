// content/placeholder.rs - 默认值占位符
//! 支持的内置占位符: {{title}} {{slug}} {{now}} {{year}} {{month}} {{day}}
//! {{hour12}} {{hour24}} {{ampm}} {{minute}}，以及配置中的自定义占位符

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt::Write;

use crate::config::{check_date_format, CustomPlaceholder};
use crate::error::{CmsError, CmsResult};

static PLACEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // {{ name }}
    Regex::new(r"\{\{\s*([A-Za-z0-9_\-]+)\s*\}\}").expect("valid placeholder pattern")
});

/// 占位符处理上下文
pub struct Placeholders<'a> {
    title: &'a str,
    date_format: &'a str,
    now: DateTime<Local>,
    custom: &'a [CustomPlaceholder],
}

impl<'a> Placeholders<'a> {
    pub fn new(title: &'a str, date_format: &'a str) -> Self {
        Self {
            title,
            date_format,
            now: Local::now(),
            custom: &[],
        }
    }

    pub fn with_now(mut self, now: DateTime<Local>) -> Self {
        self.now = now;
        self
    }

    pub fn with_custom(mut self, custom: &'a [CustomPlaceholder]) -> Self {
        self.custom = custom;
        self
    }

    /// 先内置、后自定义
    pub fn process(&self, value: &str) -> String {
        let known = self.process_known(value);
        self.process_custom(&known)
    }

    /// 替换内置占位符，未知占位符原样保留
    pub fn process_known(&self, value: &str) -> String {
        PLACEHOLDER_PATTERN
            .replace_all(value, |caps: &Captures| {
                self.known_value(&caps[1])
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// 替换自定义占位符，自定义值内部的内置占位符也会被处理
    pub fn process_custom(&self, value: &str) -> String {
        if self.custom.is_empty() {
            return value.to_string();
        }
        PLACEHOLDER_PATTERN
            .replace_all(value, |caps: &Captures| {
                match self.custom.iter().find(|p| p.id == caps[1]) {
                    Some(placeholder) => self.process_known(&placeholder.value),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    fn known_value(&self, name: &str) -> Option<String> {
        let now = &self.now;
        let value = match name {
            "title" => self.title.to_string(),
            "slug" => slugify(self.title),
            "now" => format_date(now, self.date_format).ok()?,
            "year" => now.format("%Y").to_string(),
            "month" => now.format("%m").to_string(),
            "day" => now.format("%d").to_string(),
            "hour12" => now.format("%I").to_string(),
            "hour24" => now.format("%H").to_string(),
            "ampm" => now.format("%p").to_string(),
            "minute" => now.format("%M").to_string(),
            _ => return None,
        };
        Some(value)
    }
}

/// 按配置的格式串格式化时间，格式串无效时返回 Config 错误
pub fn format_date(date: &DateTime<Local>, format: &str) -> CmsResult<String> {
    check_date_format(format)?;
    let mut out = String::new();
    write!(out, "{}", date.format(format))
        .map_err(|_| CmsError::Config(format!("invalid date_format: {format}")))?;
    Ok(out)
}

/// 标题 -> slug
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;

    for ch in title.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            slug.push(ch);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    slug.trim_end_matches('-').to_string()
}
