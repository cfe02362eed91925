//! 应用配置
//!
//! 从 `~/.modudesk/config.yaml` 读取，所有字段都有默认值

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("无法读取配置文件 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// 应用数据目录
pub fn app_home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".modudesk")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 插件目录
    pub plugins_dir: PathBuf,
    /// SQLite 数据库文件
    pub database_path: PathBuf,
    pub logging: LoggingConfig,
    pub host: HostConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let home = app_home_dir();
        Self {
            plugins_dir: home.join("plugins"),
            database_path: home.join("app_data.db"),
            logging: LoggingConfig::default(),
            host: HostConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn default_path() -> PathBuf {
        app_home_dir().join("config.yaml")
    }

    /// 读取配置，文件不存在时返回默认配置
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("配置文件 {} 不存在，使用默认配置", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_yaml::to_string(self)?;
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, content).map_err(io_err)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace / debug / info / warn / error
    pub level: String,
    /// 是否写入日志文件
    pub file_logging: bool,
    pub log_dir: PathBuf,
    pub retention_days: u32,
    /// 超过该大小（字节）时在启动时轮转
    pub max_file_size: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: true,
            log_dir: app_home_dir().join("logs"),
            retention_days: 7,
            max_file_size: 10 * 1024 * 1024,
        }
    }
}

/// 插件宿主配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// 插件文件扩展名
    pub extension: String,
    /// 扫描时跳过的保留文件名（不含扩展名）
    pub reserved: Vec<String>,
    /// 加载前按标识符排序，保证标签页顺序稳定
    pub sort_by_identifier: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            extension: "json".to_string(),
            reserved: vec!["__init__".to_string()],
            sort_by_identifier: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.host.extension, "json");
        assert!(config.host.sort_by_identifier);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "plugins_dir: /opt/plugins\nlogging:\n  level: debug\nhost:\n  sort_by_identifier: false\n",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.plugins_dir, PathBuf::from("/opt/plugins"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.retention_days, 7);
        assert!(!config.host.sort_by_identifier);
        assert_eq!(config.host.reserved, vec!["__init__".to_string()]);
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "logging: [not, a, map]\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let mut config = AppConfig::default();
        config.host.extension = "plugin".to_string();
        config.logging.file_logging = false;

        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }
}
