pub mod dao;
pub mod schema;

use parking_lot::{Mutex, MutexGuard};
use rusqlite::{Connection, Params};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::AppConfig;

pub type DbConnection = Arc<Mutex<Connection>>;

/// 数据库句柄
///
/// 显式构造后按引用传递给需要记录事件的插件，克隆共享同一连接
#[derive(Clone)]
pub struct Database {
    conn: DbConnection,
}

impl Database {
    /// 打开数据库文件并建表
    pub fn open(path: &Path) -> Result<Self, rusqlite::Error> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, rusqlite::Error> {
        schema::create_tables(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 执行参数化语句并提交，返回受影响行数
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> Result<usize, rusqlite::Error> {
        self.conn.lock().execute(sql, params)
    }

    /// 记录一条系统日志
    pub fn record_event(&self, message: &str) -> Result<i64, rusqlite::Error> {
        dao::system_logs::SystemLogsDao::insert(&self.conn.lock(), message)
    }

    pub fn connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }
}

/// 获取数据库文件路径
pub fn get_db_path(config: &AppConfig) -> Result<PathBuf, String> {
    let db_path = config.database_path.clone();
    if let Some(db_dir) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(db_dir)
            .map_err(|e| format!("无法创建数据库目录 {:?}: {}", db_dir, e))?;
    }
    Ok(db_path)
}

/// 初始化数据库连接
pub fn init_database(config: &AppConfig) -> Result<Database, String> {
    let db_path = get_db_path(config)?;
    let db = Database::open(&db_path).map_err(|e| e.to_string())?;
    tracing::info!("[数据库] 已打开 {}", db_path.display());
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::params;
    use tempfile::TempDir;

    #[test]
    fn test_execute_commits() {
        let db = Database::open_in_memory().unwrap();
        let rows = db
            .execute(
                "INSERT INTO system_logs (message) VALUES (?1)",
                params!["hello"],
            )
            .unwrap();
        assert_eq!(rows, 1);

        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM system_logs", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_clones_share_connection() {
        let db = Database::open_in_memory().unwrap();
        let other = db.clone();
        other.record_event("来自克隆").unwrap();

        let logs = dao::system_logs::SystemLogsDao::recent(&db.connection(), 10).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].message, "来自克隆");
    }

    #[test]
    fn test_init_database_creates_parent_dir() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            database_path: dir.path().join("nested").join("app_data.db"),
            ..AppConfig::default()
        };

        let db = init_database(&config).unwrap();
        db.record_event("started").unwrap();
        drop(db);

        let reopened = Database::open(&config.database_path).unwrap();
        let count = dao::system_logs::SystemLogsDao::count(&reopened.connection()).unwrap();
        assert_eq!(count, 1);
    }
}
