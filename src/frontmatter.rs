// frontmatter.rs - front matter 读写
//! 解析内容文件开头的 `---` YAML 块，并在修改后写回

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{CmsError, CmsResult};

/// front matter 记录（保持键的出现顺序）
pub type Record = Map<String, Value>;

const DELIMITER: &str = "---";

/// 内容文件：元数据 + 正文
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub data: Record,
    pub content: String,
}

impl FrontMatter {
    pub fn new(data: Record, content: impl Into<String>) -> Self {
        Self {
            data,
            content: content.into(),
        }
    }

    /// 解析文本，没有 front matter 时 data 为空、content 为全文
    pub fn parse(input: &str) -> CmsResult<Self> {
        let input = input.trim_start_matches('\u{feff}');

        let Some((yaml, content)) = split_block(input) else {
            return Ok(Self::new(Record::new(), input));
        };

        if yaml.trim().is_empty() {
            return Ok(Self::new(Record::new(), content));
        }

        let data = match serde_yaml::from_str::<Value>(yaml)? {
            Value::Object(map) => map,
            Value::Null => Record::new(),
            other => return Err(CmsError::InvalidFrontMatter(other.to_string())),
        };

        Ok(Self::new(data, content))
    }

    /// 序列化为 `---\n<yaml>---\n<content>`，data 为空时只输出正文
    pub fn stringify(&self) -> CmsResult<String> {
        if self.data.is_empty() {
            return Ok(self.content.clone());
        }

        let yaml = serde_yaml::to_string(&self.data)?;
        Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{}", self.content))
    }

    /// 从文件读取
    pub fn read(path: &Path) -> CmsResult<Self> {
        let text = fs::read_to_string(path)?;
        debug!(path = %path.display(), "读取 front matter");
        Self::parse(&text)
    }

    /// 写回文件
    pub fn write(&self, path: &Path) -> CmsResult<()> {
        fs::write(path, self.stringify()?)?;
        debug!(path = %path.display(), "写入 front matter");
        Ok(())
    }

    /// 字符串类型的值
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}

/// 拆分出 YAML 块与正文
fn split_block(input: &str) -> Option<(&str, &str)> {
    let rest = input.strip_prefix(DELIMITER)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == DELIMITER || trimmed == "..." {
            let yaml = &rest[..offset];
            let content = &rest[offset + line.len()..];
            return Some((yaml, content));
        }
        offset += line.len();
    }

    None
}
