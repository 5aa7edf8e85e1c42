// content/workflow.rs - 内容类型工作流
//! 所有提问都在写文件之前完成，用户取消时不会留下任何修改

use chrono::Local;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::draft::draft_status;
use super::placeholder::{format_date, slugify, Placeholders};
use crate::config::AppConfig;
use crate::error::{CmsError, CmsResult};
use crate::frontmatter::{FrontMatter, Record};
use crate::infer::FieldInferencer;
use crate::prompt::Prompter;
use crate::schema::{
    ContentType, Field, FieldType, DEFAULT_CONTENT_TYPE_NAME, FIELD_DRAFT, FIELD_TITLE, FIELD_TYPE,
};

/// 内容类型管理器：持有项目配置，修改后写回配置文件
pub struct ContentManager {
    config: AppConfig,
    config_path: PathBuf,
}

impl ContentManager {
    pub fn new(config: AppConfig, config_path: impl Into<PathBuf>) -> Self {
        Self {
            config,
            config_path: config_path.into(),
        }
    }

    /// 从配置文件创建
    pub fn open(config_path: impl Into<PathBuf>) -> CmsResult<Self> {
        let config_path = config_path.into();
        let config = AppConfig::load_from_file(&config_path)?;
        Ok(Self::new(config, config_path))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn inferencer(&self) -> FieldInferencer {
        FieldInferencer::new().with_date_format(self.config.content.date_format.clone())
    }

    /// 内容类型功能是否开启
    fn verify(&self) -> CmsResult<()> {
        if self.config.features.content_type {
            Ok(())
        } else {
            Err(CmsError::FeatureDisabled)
        }
    }

    fn save(&self) -> CmsResult<()> {
        self.config.save_to_file(&self.config_path)
    }

    fn read_front_matter(&self, file: &Path) -> CmsResult<FrontMatter> {
        let fm = FrontMatter::read(file)?;
        if fm.data.is_empty() {
            return Err(CmsError::NoFrontMatter(file.to_path_buf()));
        }
        Ok(fm)
    }

    /// 替换同名内容类型，不存在则追加
    fn upsert_content_type(&mut self, content_type: ContentType) {
        match self
            .config
            .content_types
            .iter_mut()
            .find(|ct| ct.name == content_type.name)
        {
            Some(existing) => existing.fields = content_type.fields,
            None => self.config.content_types.push(content_type),
        }
    }

    // ============== 生成内容类型 ==============

    /// 根据文件的 front matter 生成内容类型
    pub fn generate(&mut self, file: &Path, prompter: &mut dyn Prompter) -> CmsResult<Option<ContentType>> {
        self.verify()?;
        let mut fm = self.read_front_matter(file)?;

        let Some(override_default) = prompter.confirm("Do you want to override the default content type?")
        else {
            return Ok(None);
        };

        let name = if override_default {
            DEFAULT_CONTENT_TYPE_NAME.to_string()
        } else {
            let existing = self.config.content_type_names();
            let validate = |value: &str| name_problem(value, &existing);
            let Some(name) = prompter.input("Enter the name of the content type to generate", &validate)
            else {
                return Err(CmsError::MissingName);
            };
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(CmsError::MissingName);
            }
            if name_problem(&name, &existing).is_some() {
                return Err(CmsError::ContentTypeExists(name));
            }
            name
        };

        let is_index = file
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with("index."));
        let page_bundle = if is_index {
            match prompter.confirm("Do you want to use this content type as a page bundle?") {
                Some(answer) => answer,
                None => return Ok(None),
            }
        } else {
            false
        };

        let fields = self.inferencer().infer(&fm.data, Vec::new());
        let mut content_type = ContentType {
            name: name.clone(),
            page_bundle,
            fields,
        };

        if !override_default {
            content_type.ensure_type_field();
        }

        // 先保存配置，成功后再改文件
        let previous = self.config.content_types.clone();
        if override_default {
            self.upsert_content_type(content_type.clone());
        } else {
            self.config.content_types.push(content_type.clone());
        }
        if let Err(e) = self.save() {
            self.config.content_types = previous;
            return Err(e);
        }

        if !override_default {
            fm.data.insert(FIELD_TYPE.to_string(), Value::String(name.clone()));
            fm.write(file)?;
        }

        info!(
            content_type = %name,
            fields = content_type.fields.len(),
            "内容类型已{}",
            if override_default { "更新" } else { "生成" }
        );
        Ok(Some(content_type))
    }

    // ============== 补充缺失字段 ==============

    /// 把文件中存在、内容类型中缺失的字段追加到内容类型
    pub fn add_missing_fields(&mut self, file: &Path) -> CmsResult<ContentType> {
        self.verify()?;
        let fm = self.read_front_matter(file)?;

        let mut content_type = self.config.content_type_or_default(fm.get_str(FIELD_TYPE));
        let before = content_type.fields.len();
        content_type.fields = self.inferencer().infer(&fm.data, content_type.fields);

        self.upsert_content_type(content_type.clone());
        self.save()?;

        info!(
            content_type = %content_type.name,
            added = content_type.fields.len() - before,
            "内容类型已更新"
        );
        Ok(content_type)
    }

    // ============== 设置内容类型 ==============

    /// 选择内容类型并写入文件的 `type`
    pub fn set_content_type(&self, file: &Path, prompter: &mut dyn Prompter) -> CmsResult<Option<String>> {
        self.verify()?;
        let mut fm = self.read_front_matter(file)?;

        let Some(name) = prompter.select("Select the content type", &self.config.content_type_names())
        else {
            return Ok(None);
        };

        fm.data.insert(FIELD_TYPE.to_string(), Value::String(name.clone()));
        fm.write(file)?;
        debug!(file = %file.display(), content_type = %name, "内容类型已设置");
        Ok(Some(name))
    }

    // ============== 创建内容 ==============

    /// 选择内容类型、内容目录，输入标题后创建文件
    pub fn create_content(&self, prompter: &mut dyn Prompter) -> CmsResult<Option<PathBuf>> {
        let Some(type_name) = prompter.select("Select the content type", &self.config.content_type_names())
        else {
            return Ok(None);
        };

        let folder_titles: Vec<String> = self.config.content.folders.iter().map(|f| f.title.clone()).collect();
        let Some(folder_title) = prompter.select("Select the content folder", &folder_titles) else {
            return Ok(None);
        };

        let content_type = self
            .config
            .content_type(&type_name)
            .ok_or_else(|| CmsError::ContentTypeNotFound(type_name.clone()))?;
        let folder = self
            .config
            .content
            .folders
            .iter()
            .find(|f| f.title == folder_title)
            .map(|f| self.config.content_folder_path(f))
            .ok_or_else(|| CmsError::Config(format!("unknown content folder: {folder_title}")))?;

        let not_empty = |value: &str| value.trim().is_empty().then(|| "Please enter a title".to_string());
        let Some(title) = prompter.input("What would you like to use as a title?", &not_empty) else {
            return Ok(None);
        };

        self.create(content_type, &folder, title.trim()).map(Some)
    }

    /// 在 folder 中按内容类型创建新文件，返回文件路径
    pub fn create(&self, content_type: &ContentType, folder: &Path, title: &str) -> CmsResult<PathBuf> {
        let path = self.content_path(content_type, folder, title)?;
        if path.exists() {
            return Err(CmsError::FileExists(path));
        }

        let mut fields = content_type.fields.clone();
        if content_type.is_default() && self.config.is_jekyll() {
            fields.retain(|f| f.name != FIELD_DRAFT);
        }

        let mut data = self.process_fields(&fields, title);
        self.update_dates(&mut data, &fields)?;

        if !content_type.is_default() {
            data.insert(FIELD_TYPE.to_string(), Value::String(content_type.name.clone()));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        FrontMatter::new(data, "").write(&path)?;

        info!(path = %path.display(), content_type = %content_type.name, "内容已创建");
        Ok(path)
    }

    /// `<folder>/<slug>.<ext>`，page bundle 为 `<folder>/<slug>/index.<ext>`
    pub fn content_path(&self, content_type: &ContentType, folder: &Path, title: &str) -> CmsResult<PathBuf> {
        let slug = slugify(title);
        if slug.is_empty() {
            return Err(CmsError::Config(format!("title '{title}' produces an empty slug")));
        }

        let extension = self
            .config
            .content
            .supported_extensions
            .first()
            .map(String::as_str)
            .unwrap_or("md");

        Ok(if content_type.page_bundle {
            folder.join(&slug).join(format!("index.{extension}"))
        } else {
            folder.join(format!("{slug}.{extension}"))
        })
    }

    /// 根据字段默认值生成初始 front matter
    pub fn process_fields(&self, fields: &[Field], title: &str) -> Record {
        let placeholders = Placeholders::new(title, &self.config.content.date_format)
            .with_custom(&self.config.placeholders);
        process_fields(fields, &placeholders, title)
    }

    /// 空的 datetime 字段填入当前时间
    fn update_dates(&self, data: &mut Record, fields: &[Field]) -> CmsResult<()> {
        let now = format_date(&Local::now(), &self.config.content.date_format)?;
        for field in fields.iter().filter(|f| f.field_type == FieldType::Datetime) {
            if let Some(value) = data.get_mut(&field.name) {
                if value.as_str().is_some_and(str::is_empty) {
                    *value = Value::String(now.clone());
                }
            }
        }
        Ok(())
    }

    // ============== 草稿状态 ==============

    pub fn draft_status(&self, data: &Record) -> Option<String> {
        let content_type = self
            .config
            .content_type_or_default(data.get(FIELD_TYPE).and_then(Value::as_str));
        draft_status(data, &content_type, self.config.content.draft_field.as_ref())
    }
}

fn process_fields(fields: &[Field], placeholders: &Placeholders<'_>, title: &str) -> Record {
    let mut data = Record::new();

    for field in fields {
        let value = if field.name == FIELD_TITLE {
            match &field.default {
                Some(Value::String(default)) if !default.is_empty() => {
                    Value::String(placeholders.process(default))
                }
                _ => Value::String(title.to_string()),
            }
        } else if field.field_type == FieldType::Fields {
            Value::Object(process_fields(field.sub_fields(), placeholders, title))
        } else {
            match &field.default {
                Some(Value::String(default)) => Value::String(placeholders.process(default)),
                Some(other) => other.clone(),
                None => Value::String(String::new()),
            }
        };
        data.insert(field.name.clone(), value);
    }

    data
}

/// 内容类型名校验，返回 Some(提示) 表示无效
fn name_problem(value: &str, existing: &[String]) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Please enter a name for the content type".to_string());
    }
    if existing.iter().any(|n| n.eq_ignore_ascii_case(value)) {
        return Some("A content type with this name already exists".to_string());
    }
    None
}
