use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use tracing::Level;

pub const DB_FILE_NAME: &str = "videos.sqlite";
pub const DB_PATH_ENV: &str = "VIDTABLE_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "VIDTABLE_LOG";
pub const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub page_size: i64,
    pub log_level: Level,
}

impl AppConfig {
    pub fn resolve() -> Result<Self> {
        let data_dir = default_data_dir()?;
        Ok(Self::from_parts(
            data_dir,
            std::env::var(DB_PATH_ENV).ok(),
            std::env::var(LOG_LEVEL_ENV).ok(),
        ))
    }

    pub fn from_parts(
        data_dir: PathBuf,
        db_path_override: Option<String>,
        log_level_override: Option<String>,
    ) -> Self {
        let db_path = db_path_override
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(DB_FILE_NAME));

        Self {
            data_dir,
            db_path,
            page_size: DEFAULT_PAGE_SIZE,
            log_level: parse_log_level(log_level_override.as_deref()),
        }
    }

    pub fn webview_data_dir(&self) -> Result<PathBuf> {
        ensure_webview_data_dir(&self.data_dir)
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "vidtable", "vidtable")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    Ok(project_dirs.data_local_dir().to_path_buf())
}

pub fn parse_log_level(raw: Option<&str>) -> Level {
    match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("trace") => Level::TRACE,
        Some("debug") => Level::DEBUG,
        Some("warn") => Level::WARN,
        Some("error") => Level::ERROR,
        _ => Level::INFO,
    }
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}
