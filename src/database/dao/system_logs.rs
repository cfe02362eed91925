//! 系统日志数据访问对象

use rusqlite::{params, Connection};
use serde::Serialize;

/// 系统日志记录
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemLogRecord {
    pub id: i64,
    pub message: String,
    /// SQLite `CURRENT_TIMESTAMP` 格式 (UTC)
    pub created_at: String,
}

pub struct SystemLogsDao;

impl SystemLogsDao {
    /// 插入日志，返回新记录 ID
    pub fn insert(conn: &Connection, message: &str) -> Result<i64, rusqlite::Error> {
        conn.execute(
            "INSERT INTO system_logs (message) VALUES (?1)",
            params![message],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 最近的日志，新的在前
    pub fn recent(conn: &Connection, limit: usize) -> Result<Vec<SystemLogRecord>, rusqlite::Error> {
        let mut stmt = conn.prepare(
            "SELECT id, COALESCE(message, ''), created_at
             FROM system_logs ORDER BY id DESC LIMIT ?1",
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], |row| {
            Ok(SystemLogRecord {
                id: row.get(0)?,
                message: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?;
        rows.collect()
    }

    pub fn count(conn: &Connection) -> Result<i64, rusqlite::Error> {
        conn.query_row("SELECT COUNT(*) FROM system_logs", [], |row| row.get(0))
    }
}
