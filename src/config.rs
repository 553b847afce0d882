use crate::error::{MallaJobsError, Result};
use malla_common::MatchOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 環境変数: 待ち受けポート
pub const ENV_PORT: &str = "PORT";
/// 環境変数: ログレベル
pub const ENV_LOG: &str = "MALLA_JOBS_LOG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// JSONボディの上限（バイト）
    pub body_limit_bytes: usize,
    pub log_level: String,
    pub match_options: MatchOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            body_limit_bytes: 2 * 1024 * 1024, // 2mb
            log_level: "info".into(),
            match_options: MatchOptions::default(),
        }
    }
}

impl Config {
    /// 既定の設定ファイルを読み込み、環境変数で上書き
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            Self::default()
        };

        config.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MallaJobsError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MallaJobsError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("malla-jobs").join("config.json"))
    }

    /// 環境変数による上書き（PORT / MALLA_JOBS_LOG）
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| MallaJobsError::Config(format!("{} が不正です: {}", ENV_PORT, port)))?;
        }
        if let Some(level) = lookup(ENV_LOG) {
            if !level.trim().is_empty() {
                self.log_level = level.trim().to_string();
            }
        }
        Ok(self)
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
