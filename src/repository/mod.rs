// ==========================================
// 设施资产管理系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 命名缓存的读取/整体替换, 屏蔽存储细节
// 实现: SQLite (生产) / 内存 (测试)
// ==========================================

pub mod cache_store;
pub mod collection_repo;
pub mod error;
pub mod memory_store;
pub mod sqlite_store;

// 重导出核心仓储
pub use cache_store::{CacheName, CacheStore, CACHE_KEY_SUFFIX};
pub use collection_repo::{CollectionRepository, Repositories};
pub use error::{RepositoryError, RepositoryResult};
pub use memory_store::InMemoryCacheStore;
pub use sqlite_store::SqliteCacheStore;
