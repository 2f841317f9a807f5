// ==========================================
// 设施资产管理系统 - SQLite 缓存存储
// ==========================================
// 表: cache_entry (cache_key PK, payload JSON, updated_at)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::repository::cache_store::{CacheName, CacheStore};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// SQLite 缓存存储
pub struct SqliteCacheStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCacheStore {
    /// 打开数据库文件并建表
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        crate::db::init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建（调用方负责建表）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl CacheStore for SqliteCacheStore {
    fn read_raw(&self, cache: CacheName) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let payload = conn
            .query_row(
                "SELECT payload FROM cache_entry WHERE cache_key = ?1",
                params![cache.storage_key()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write_raw(&self, cache: CacheName, payload: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO cache_entry (cache_key, payload, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(cache_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
            params![cache.storage_key(), payload],
        )?;
        Ok(())
    }

    fn clear(&self, cache: CacheName) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "DELETE FROM cache_entry WHERE cache_key = ?1",
            params![cache.storage_key()],
        )?;
        Ok(())
    }
}
