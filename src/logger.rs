//! 日志管理模块
use chrono::{Duration, Local, Utc};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use tracing::Level;

use crate::config::LoggingConfig;

const LOG_FILE_NAME: &str = "modudesk.log";

/// 初始化 tracing 订阅器
///
/// 启用文件日志时返回日志文件路径；重复调用不会覆盖已安装的订阅器
pub fn init_logging(config: &LoggingConfig) -> Result<Option<PathBuf>, String> {
    let level = parse_level(&config.level);

    if !config.file_logging {
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .try_init();
        return Ok(None);
    }

    fs::create_dir_all(&config.log_dir)
        .map_err(|e| format!("无法创建日志目录 {:?}: {}", config.log_dir, e))?;
    let path = config.log_dir.join(LOG_FILE_NAME);
    rotate_log_file_if_needed(&path, config.max_file_size);
    prune_old_logs(&path, config.retention_days);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("无法打开日志文件 {:?}: {}", path, e))?;
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(Some(path))
}

/// 无法识别的级别按 info 处理
pub fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::INFO)
}

/// 日志文件超过上限时重命名为 `<name>.<时间戳>`
pub fn rotate_log_file_if_needed(path: &Path, max_file_size: u64) -> Option<PathBuf> {
    let metadata = fs::metadata(path).ok()?;
    if metadata.len() <= max_file_size {
        return None;
    }

    let suffix = Local::now().format("%Y%m%d-%H%M%S");
    let rotated = path.with_file_name(format!(
        "{}.{}",
        path.file_name().unwrap_or_default().to_string_lossy(),
        suffix
    ));
    fs::rename(path, &rotated).ok()?;
    Some(rotated)
}

/// 删除超过保留天数的已轮转日志，返回删除数量
///
/// 轮转后的文件不做 gzip 归档，超期直接删除
pub fn prune_old_logs(path: &Path, retention_days: u32) -> usize {
    let Some(dir) = path.parent() else {
        return 0;
    };
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    let cutoff = Utc::now() - Duration::days(retention_days as i64);
    let prefix = format!(
        "{}.",
        path.file_name().unwrap_or_default().to_string_lossy()
    );

    let mut removed = 0;
    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        if !file_name.starts_with(&prefix) {
            continue;
        }
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        let Ok(modified) = metadata.modified() else {
            continue;
        };
        let modified = chrono::DateTime::<Utc>::from(modified);
        if modified < cutoff && fs::remove_file(entry.path()).is_ok() {
            removed += 1;
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration as StdDuration, SystemTime};
    use tempfile::TempDir;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level(" WARN "), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_rotate_only_when_over_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        fs::write(&path, "short").unwrap();
        assert!(rotate_log_file_if_needed(&path, 1024).is_none());
        assert!(path.exists());

        fs::write(&path, "x".repeat(64)).unwrap();
        let rotated = rotate_log_file_if_needed(&path, 16).unwrap();
        assert!(!path.exists());
        assert!(rotated.exists());
        assert!(rotated
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("modudesk.log."));
    }

    #[test]
    fn test_rotate_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(rotate_log_file_if_needed(&dir.path().join(LOG_FILE_NAME), 0).is_none());
    }

    #[test]
    fn test_prune_old_logs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        fs::write(&path, "current").unwrap();

        let old = dir.path().join("modudesk.log.20200101-000000");
        fs::write(&old, "old").unwrap();
        let ten_days_ago = SystemTime::now() - StdDuration::from_secs(10 * 24 * 3600);
        fs::File::options()
            .write(true)
            .open(&old)
            .unwrap()
            .set_modified(ten_days_ago)
            .unwrap();

        let fresh = dir.path().join("modudesk.log.20991231-000000");
        fs::write(&fresh, "fresh").unwrap();
        let unrelated = dir.path().join("other.log.1");
        fs::write(&unrelated, "other").unwrap();
        fs::File::options()
            .write(true)
            .open(&unrelated)
            .unwrap()
            .set_modified(ten_days_ago)
            .unwrap();

        assert_eq!(prune_old_logs(&path, 7), 1);
        assert!(!old.exists());
        assert!(fresh.exists());
        assert!(unrelated.exists());
        assert!(path.exists());
    }

    #[test]
    fn test_init_logging_creates_log_file() {
        let dir = TempDir::new().unwrap();
        let config = LoggingConfig {
            log_dir: dir.path().join("logs"),
            ..LoggingConfig::default()
        };

        let path = init_logging(&config).unwrap().unwrap();
        assert_eq!(path, dir.path().join("logs").join(LOG_FILE_NAME));
        assert!(path.exists());
    }
}
