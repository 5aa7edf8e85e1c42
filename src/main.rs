// main.rs
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use frontmatter_cms::assets::{AssetResolver, ImageProcessor};
use frontmatter_cms::config::{AppConfig, CONFIG_FILE};
use frontmatter_cms::content::ContentManager;
use frontmatter_cms::dashboard::{breadcrumb, list_pages};
use frontmatter_cms::error::CmsError;
use frontmatter_cms::frontmatter::FrontMatter;
use frontmatter_cms::prompt::InteractivePrompter;
use frontmatter_cms::schema::FIELD_TYPE;

/// front matter 内容管理工具
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 项目配置文件
    #[arg(short, long, env = "FMCMS_CONFIG", default_value = CONFIG_FILE)]
    config: PathBuf,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,

    /// 只输出警告和错误
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 生成默认配置文件
    Init {
        /// 覆盖已有文件
        #[arg(long)]
        force: bool,
    },
    /// 打印从文件推断出的字段
    Infer { file: PathBuf },
    /// 从文件生成内容类型
    Generate { file: PathBuf },
    /// 把文件中缺失的字段加入其内容类型
    AddMissingFields { file: PathBuf },
    /// 设置文件的内容类型
    SetType { file: PathBuf },
    /// 按内容类型创建新内容
    Create,
    /// 相对路径 -> 绝对路径
    Resolve {
        /// 引用资源的内容文件
        file: PathBuf,
        reference: String,
    },
    /// 绝对路径 -> 相对路径
    Relative { path: String },
    /// 打印文件的图片预览信息
    Images { file: PathBuf },
    /// 打印文件的草稿状态
    DraftStatus { file: PathBuf },
    /// 打印媒体目录的面包屑
    Breadcrumb { folder: PathBuf },
    /// 列出所有内容页面
    Pages,
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Err(err) => match err.downcast_ref::<CmsError>() {
            // 提示类错误只警告
            Some(
                CmsError::NoFrontMatter(_)
                | CmsError::MissingName
                | CmsError::ContentTypeExists(_)
                | CmsError::FileExists(_)
                | CmsError::FeatureDisabled,
            ) => {
                warn!("{err}");
                Ok(())
            }
            _ => Err(err),
        },
        ok => ok,
    }
}

fn run(cli: &Cli) -> Result<()> {
    if let Command::Init { force } = &cli.command {
        if cli.config.exists() && !force {
            warn!("配置文件已存在: {}", cli.config.display());
            return Ok(());
        }
        AppConfig::generate_default_config(&cli.config)
            .with_context(|| format!("无法写入配置文件 {}", cli.config.display()))?;
        info!("已生成配置文件: {}", cli.config.display());
        return Ok(());
    }

    let mut manager = ContentManager::open(&cli.config)
        .with_context(|| format!("无法加载配置文件 {}", cli.config.display()))?;

    match &cli.command {
        Command::Init { .. } => {}
        Command::Infer { file } => {
            let fm = read(file)?;
            let fields = manager.inferencer().infer(&fm.data, Vec::new());
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
        Command::Generate { file } => {
            let mut prompter = InteractivePrompter::new();
            match manager.generate(file, &mut prompter)? {
                Some(ct) => info!("内容类型 {} 已保存到 {}", ct.name, cli.config.display()),
                None => info!("已取消"),
            }
        }
        Command::AddMissingFields { file } => {
            let ct = manager.add_missing_fields(file)?;
            info!("内容类型 {} 已更新", ct.name);
        }
        Command::SetType { file } => {
            let mut prompter = InteractivePrompter::new();
            match manager.set_content_type(file, &mut prompter)? {
                Some(name) => info!("{} 的内容类型已设为 {}", file.display(), name),
                None => info!("已取消"),
            }
        }
        Command::Create => {
            let mut prompter = InteractivePrompter::new();
            match manager.create_content(&mut prompter)? {
                Some(path) => println!("{}", path.display()),
                None => info!("已取消"),
            }
        }
        Command::Resolve { file, reference } => {
            let resolver = AssetResolver::from_config(manager.config());
            match resolver.resolve_absolute(file, reference) {
                Some(path) => println!("{}", path.display()),
                None => warn!("未找到资源: {reference}"),
            }
        }
        Command::Relative { path } => {
            let resolver = AssetResolver::from_config(manager.config());
            println!("{}", resolver.to_relative(path));
        }
        Command::Images { file } => {
            let fm = read(file)?;
            let config = manager.config();
            let content_type = config.content_type_or_default(fm.get_str(FIELD_TYPE));
            let resolver = AssetResolver::from_config(config);
            let processed = ImageProcessor::new(&resolver).process_image_fields(&fm.data, &content_type.fields, file);
            println!("{}", serde_json::to_string_pretty(&processed)?);
        }
        Command::DraftStatus { file } => {
            let fm = read(file)?;
            match manager.draft_status(&fm.data) {
                Some(status) => println!("{status}"),
                None => println!("-"),
            }
        }
        Command::Breadcrumb { folder } => {
            let config = manager.config();
            let root = config
                .workspace_root()
                .context("配置中没有工作区根目录")?;
            let crumbs = breadcrumb(
                Some(folder.as_path()),
                &root,
                config.workspace.static_folder.as_deref(),
                &config.content_folder_paths(),
            );
            println!("{}", serde_json::to_string_pretty(&crumbs)?);
        }
        Command::Pages => {
            let pages = list_pages(manager.config());
            println!("{}", serde_json::to_string_pretty(&pages)?);
        }
    }

    Ok(())
}

fn read(file: &Path) -> Result<FrontMatter> {
    FrontMatter::read(file).with_context(|| format!("无法读取 {}", file.display()))
}
