// ==========================================
// 设施资产管理系统 - 类型化集合仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 语义: get_all 整体读取, put_all 整体替换 (后写者胜)
// 容错: 缓存 JSON 损坏时按空集合处理, 不向上传播
// ==========================================

use crate::domain::{
    Asset, Branch, Delivery, MaintenanceTask, MinimumLevel, ReplenishmentRequest, Sla, TankLog,
    Vendor, WorkOrder,
};
use crate::repository::cache_store::{CacheName, CacheStore};
use crate::repository::error::{RepositoryError, RepositoryResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;

// ==========================================
// CollectionRepository<T> - 单个命名缓存的类型化视图
// ==========================================
pub struct CollectionRepository<T> {
    store: Arc<dyn CacheStore>,
    cache: CacheName,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for CollectionRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: self.cache,
            _record: PhantomData,
        }
    }
}

impl<T> CollectionRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn CacheStore>, cache: CacheName) -> Self {
        Self {
            store,
            cache,
            _record: PhantomData,
        }
    }

    pub fn cache_name(&self) -> CacheName {
        self.cache
    }

    /// 读取整个集合
    ///
    /// # 返回
    /// - Ok(Vec<T>): 集合内容（未写入或 JSON 损坏时为空）
    /// - Err: 底层存储错误
    pub fn get_all(&self) -> RepositoryResult<Vec<T>> {
        let raw = match self.store.read_raw(self.cache)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(
                    cache = %self.cache,
                    error = %e,
                    "缓存内容无法解析, 按空集合处理"
                );
                Ok(Vec::new())
            }
        }
    }

    /// 整体替换集合
    pub fn put_all(&self, records: &[T]) -> RepositoryResult<()> {
        let payload =
            serde_json::to_string(records).map_err(|e| RepositoryError::SerializationError {
                cache: self.cache.to_string(),
                message: e.to_string(),
            })?;
        self.store.write_raw(self.cache, &payload)?;
        tracing::debug!(cache = %self.cache, count = records.len(), "缓存已整体替换");
        Ok(())
    }

    /// 读取 → 修改 → 整体写回
    ///
    /// 闭包返回 Err 时不写回, 存储保持原状
    pub fn update<R, E, F>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
        E: From<RepositoryError>,
    {
        let mut records = self.get_all()?;
        let result = f(&mut records)?;
        self.put_all(&records)?;
        Ok(result)
    }
}

// ==========================================
// Repositories - 全部命名缓存的仓储集合
// ==========================================
#[derive(Clone)]
pub struct Repositories {
    pub work_orders: CollectionRepository<WorkOrder>,
    pub assets: CollectionRepository<Asset>,
    pub vendors: CollectionRepository<Vendor>,
    pub slas: CollectionRepository<Sla>,
    pub branches: CollectionRepository<Branch>,
    pub minimum_levels: CollectionRepository<MinimumLevel>,
    pub tank_logs: CollectionRepository<TankLog>,
    pub replenishment_requests: CollectionRepository<ReplenishmentRequest>,
    pub deliveries: CollectionRepository<Delivery>,
    pub maintenance_tasks: CollectionRepository<MaintenanceTask>,
}

impl Repositories {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            work_orders: CollectionRepository::new(store.clone(), CacheName::WorkOrders),
            assets: CollectionRepository::new(store.clone(), CacheName::Assets),
            vendors: CollectionRepository::new(store.clone(), CacheName::Vendors),
            slas: CollectionRepository::new(store.clone(), CacheName::Slas),
            branches: CollectionRepository::new(store.clone(), CacheName::Branches),
            minimum_levels: CollectionRepository::new(store.clone(), CacheName::MinimumLevels),
            tank_logs: CollectionRepository::new(store.clone(), CacheName::TankLogs),
            replenishment_requests: CollectionRepository::new(
                store.clone(),
                CacheName::ReplenishmentRequests,
            ),
            deliveries: CollectionRepository::new(store.clone(), CacheName::Deliveries),
            maintenance_tasks: CollectionRepository::new(store, CacheName::MaintenanceTasks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory_store::InMemoryCacheStore;

    fn vendors() -> (Arc<InMemoryCacheStore>, CollectionRepository<Vendor>) {
        let store = Arc::new(InMemoryCacheStore::new());
        let repo = CollectionRepository::new(store.clone() as Arc<dyn CacheStore>, CacheName::Vendors);
        (store, repo)
    }

    fn vendor(id: &str) -> Vendor {
        Vendor {
            id: id.to_string(),
            name: format!("Vendor {}", id),
            active: true,
        }
    }

    #[test]
    fn test_empty_cache_reads_as_empty() {
        let (_store, repo) = vendors();
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_put_then_get_preserves_order() {
        let (_store, repo) = vendors();
        let list = vec![vendor("V3"), vendor("V1"), vendor("V2")];
        repo.put_all(&list).unwrap();
        assert_eq!(repo.get_all().unwrap(), list);
    }

    #[test]
    fn test_malformed_json_reads_as_empty() {
        let (store, repo) = vendors();
        store.write_raw(CacheName::Vendors, "{not json").unwrap();
        assert!(repo.get_all().unwrap().is_empty());

        store.write_raw(CacheName::Vendors, "{\"id\":\"V1\"}").unwrap();
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_update_error_leaves_store_untouched() {
        let (_store, repo) = vendors();
        repo.put_all(&[vendor("V1")]).unwrap();

        let result: Result<(), RepositoryError> = repo.update(|list| {
            list.clear();
            Err(RepositoryError::InternalError("abort".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(repo.get_all().unwrap(), vec![vendor("V1")]);
    }
}
