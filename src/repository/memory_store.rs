// ==========================================
// 设施资产管理系统 - 内存缓存存储 (测试替身)
// ==========================================

use crate::repository::cache_store::{CacheName, CacheStore};
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryCacheStore {
    entries: Mutex<HashMap<CacheName, String>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for InMemoryCacheStore {
    fn read_raw(&self, cache: CacheName) -> RepositoryResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        Ok(entries.get(&cache).cloned())
    }

    fn write_raw(&self, cache: CacheName, payload: &str) -> RepositoryResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        entries.insert(cache, payload.to_string());
        Ok(())
    }

    fn clear(&self, cache: CacheName) -> RepositoryResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        entries.remove(&cache);
        Ok(())
    }
}
