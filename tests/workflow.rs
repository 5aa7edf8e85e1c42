// 内容类型工作流集成测试
use std::fs;
use std::path::{Path, PathBuf};

use frontmatter_cms::{
    AppConfig, CmsError, ContentFolder, ContentManager, ContentType, Field, FieldType, FrontMatter,
    ScriptedPrompter,
};
use serde_json::json;
use tempfile::TempDir;

struct Project {
    dir: TempDir,
    config_path: PathBuf,
}

impl Project {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("frontmatter.toml");

        let mut config = AppConfig::default();
        config.workspace.root = dir.path().to_string_lossy().to_string();
        config.content.date_format = "%Y-%m-%d".to_string();
        config.content.folders.push(ContentFolder {
            title: "Blog".into(),
            path: "content/blog".into(),
        });
        config.content_types.push(ContentType::new(
            "default",
            vec![
                Field::new("title", FieldType::String),
                Field::new("date", FieldType::Datetime),
                Field::new("draft", FieldType::Draft).with_default(true),
            ],
        ));
        config.save_to_file(&config_path).unwrap();

        fs::create_dir_all(dir.path().join("content/blog")).unwrap();
        Self { dir, config_path }
    }

    fn write(&self, relative: &str, text: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, text).unwrap();
        path
    }

    fn manager(&self) -> ContentManager {
        ContentManager::open(&self.config_path).unwrap()
    }

    fn saved_config(&self) -> AppConfig {
        AppConfig::load_from_file(&self.config_path).unwrap()
    }
}

fn read(path: &Path) -> FrontMatter {
    FrontMatter::read(path).unwrap()
}

const POST: &str = "---\ntitle: Hello\ndate: 2024-01-02\ntags:\n  - rust\nslug: hello\nrating: 4\n---\nBody\n";

#[test]
fn generate_new_content_type() {
    let project = Project::new();
    let file = project.write("content/blog/hello.md", POST);
    let mut prompter = ScriptedPrompter::new([Some("No"), Some("article")]);

    let ct = project.manager().generate(&file, &mut prompter).unwrap().unwrap();

    let names: Vec<_> = ct.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["title", "date", "tags", "rating", "type"]);
    assert_eq!(ct.fields[1].field_type, FieldType::Datetime);
    assert_eq!(ct.fields[4].hidden, Some(true));
    assert!(!ct.page_bundle);

    // 文件写入 type，配置新增内容类型
    assert_eq!(read(&file).get_str("type"), Some("article"));
    assert_eq!(read(&file).content, "Body\n");
    let saved = project.saved_config();
    assert_eq!(saved.content_type_names(), vec!["default", "article"]);
    assert_eq!(saved.content_type("article"), Some(&ct));
}

#[test]
fn generate_asks_page_bundle_for_index_files() {
    let project = Project::new();
    let file = project.write("content/blog/hello/index.md", POST);
    let mut prompter = ScriptedPrompter::new([Some("No"), Some("bundle"), Some("Yes")]);

    let ct = project.manager().generate(&file, &mut prompter).unwrap().unwrap();

    assert!(ct.page_bundle);
    assert_eq!(prompter.asked.len(), 3);
}

#[test]
fn generate_override_replaces_default_fields() {
    let project = Project::new();
    let file = project.write("content/blog/hello.md", POST);
    let mut prompter = ScriptedPrompter::new([Some("Yes")]);

    let ct = project.manager().generate(&file, &mut prompter).unwrap().unwrap();

    assert_eq!(ct.name, "default");
    assert!(!ct.has_field("type"));
    // 覆盖时不修改文件
    assert_eq!(read(&file).get_str("type"), None);
    let saved = project.saved_config();
    assert_eq!(saved.content_types.len(), 1);
    assert_eq!(saved.content_types[0].fields, ct.fields);
}

#[test]
fn generate_rejects_existing_name_and_retries() {
    let project = Project::new();
    let file = project.write("content/blog/hello.md", POST);
    let mut prompter = ScriptedPrompter::new([Some("No"), Some("Default"), Some("post")]);

    let ct = project.manager().generate(&file, &mut prompter).unwrap().unwrap();
    assert_eq!(ct.name, "post");
}

#[test]
fn generate_cancel_has_no_side_effects() {
    let project = Project::new();
    let file = project.write("content/blog/hello/index.md", POST);
    let before_config = fs::read_to_string(&project.config_path).unwrap();

    // 取消 page bundle 提问
    let mut prompter = ScriptedPrompter::new([Some("No"), Some("article"), None]);
    let result = project.manager().generate(&file, &mut prompter).unwrap();

    assert!(result.is_none());
    assert_eq!(fs::read_to_string(&file).unwrap(), POST);
    assert_eq!(fs::read_to_string(&project.config_path).unwrap(), before_config);
}

#[test]
fn generate_without_name_warns() {
    let project = Project::new();
    let file = project.write("content/blog/hello.md", POST);
    let mut prompter = ScriptedPrompter::new([Some("No"), None]);

    let result = project.manager().generate(&file, &mut prompter);
    assert!(matches!(result, Err(CmsError::MissingName)));
    assert_eq!(fs::read_to_string(&file).unwrap(), POST);
}

#[test]
fn generate_requires_front_matter() {
    let project = Project::new();
    let file = project.write("content/blog/empty.md", "# no front matter\n");
    let mut prompter = ScriptedPrompter::new([Some("No"), Some("x")]);

    let result = project.manager().generate(&file, &mut prompter);
    assert!(matches!(result, Err(CmsError::NoFrontMatter(_))));
    assert!(prompter.asked.is_empty());
}

#[test]
fn add_missing_fields_appends_only_new_keys() {
    let project = Project::new();
    let file = project.write("content/blog/hello.md", POST);

    let ct = project.manager().add_missing_fields(&file).unwrap();

    let names: Vec<_> = ct.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["title", "date", "draft", "tags", "rating"]);
    assert_eq!(project.saved_config().content_types[0], ct);

    // 再次执行不再变化
    let again = project.manager().add_missing_fields(&file).unwrap();
    assert_eq!(again, ct);
}

#[test]
fn set_content_type_writes_type() {
    let project = Project::new();
    let file = project.write("content/blog/hello.md", POST);

    let mut prompter = ScriptedPrompter::new([Some("default")]);
    let name = project.manager().set_content_type(&file, &mut prompter).unwrap();
    assert_eq!(name.as_deref(), Some("default"));
    assert_eq!(read(&file).get_str("type"), Some("default"));

    let mut prompter = ScriptedPrompter::new([None::<&str>]);
    assert!(project.manager().set_content_type(&file, &mut prompter).unwrap().is_none());
}

#[test]
fn create_content_from_default_type() {
    let project = Project::new();
    let mut prompter = ScriptedPrompter::new([Some("default"), Some("Blog"), Some("My First Post")]);

    let path = project.manager().create_content(&mut prompter).unwrap().unwrap();

    assert_eq!(path, project.dir.path().join("content/blog/my-first-post.md"));
    let fm = read(&path);
    assert_eq!(fm.data["title"], json!("My First Post"));
    assert_eq!(fm.data["draft"], json!(true));
    assert!(!fm.data["date"].as_str().unwrap().is_empty());
    assert!(fm.data.get("type").is_none());

    // 同名文件已存在
    let mut prompter = ScriptedPrompter::new([Some("default"), Some("Blog"), Some("My First Post")]);
    let result = project.manager().create_content(&mut prompter);
    assert!(matches!(result, Err(CmsError::FileExists(_))));
}

#[test]
fn create_content_for_jekyll_drops_draft() {
    let project = Project::new();
    let mut config = project.saved_config();
    config.content.framework = Some("Jekyll".into());
    config.save_to_file(&project.config_path).unwrap();

    let mut prompter = ScriptedPrompter::new([Some("default"), Some("Blog"), Some("Jekyll Post")]);
    let path = project.manager().create_content(&mut prompter).unwrap().unwrap();

    assert!(read(&path).data.get("draft").is_none());
}

#[test]
fn create_page_bundle_sets_type() {
    let project = Project::new();
    let mut config = project.saved_config();
    let mut bundle = ContentType::new("gallery", vec![Field::new("title", FieldType::String)]);
    bundle.page_bundle = true;
    config.content_types.push(bundle);
    config.save_to_file(&project.config_path).unwrap();

    let mut prompter = ScriptedPrompter::new([Some("gallery"), Some("Blog"), Some("Trip")]);
    let path = project.manager().create_content(&mut prompter).unwrap().unwrap();

    assert_eq!(path, project.dir.path().join("content/blog/trip/index.md"));
    assert_eq!(read(&path).get_str("type"), Some("gallery"));
}

#[test]
fn create_content_cancelled_at_title() {
    let project = Project::new();
    let mut prompter = ScriptedPrompter::new([Some("default"), Some("Blog"), None]);
    assert!(project.manager().create_content(&mut prompter).unwrap().is_none());
    assert_eq!(fs::read_dir(project.dir.path().join("content/blog")).unwrap().count(), 0);
}

#[test]
fn draft_status_uses_registry() {
    let project = Project::new();
    let file = project.write("content/blog/hello.md", "---\ntitle: x\ndraft: true\n---\n");
    let manager = project.manager();
    assert_eq!(manager.draft_status(&read(&file).data).as_deref(), Some("Draft"));
}

#[test]
fn saving_keeps_root_relative_to_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let site = dir.path().join("site");
    fs::create_dir_all(site.join("content")).unwrap();
    let config_path = site.join("frontmatter.toml");
    fs::write(
        &config_path,
        "[workspace]\nroot = \"\"\n\n[[content_types]]\nname = \"default\"\n",
    )
    .unwrap();
    let file = site.join("content/post.md");
    fs::write(&file, "---\ntitle: Hello\n---\n").unwrap();

    let mut manager = ContentManager::open(&config_path).unwrap();
    assert_eq!(manager.config().workspace_root(), Some(site.clone()));
    manager.add_missing_fields(&file).unwrap();

    let saved = AppConfig::load_from_file(&config_path).unwrap();
    assert!(saved.workspace.root.is_empty());
    assert_eq!(saved.content_types[0].fields.len(), 1);
    assert!(!fs::read_to_string(&config_path).unwrap().contains(&*site.to_string_lossy()));
}
