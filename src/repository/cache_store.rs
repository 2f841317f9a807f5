// ==========================================
// 设施资产管理系统 - 命名缓存存储接口
// ==========================================
// 存储模型: 每个命名缓存保存一个 JSON 数组, 整体读取/整体替换
// 无部分更新, 无并发保证 (单会话单写者)
// ==========================================

use crate::repository::error::RepositoryResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 存储键后缀, 仅作约定, 读取时不校验也不迁移
pub const CACHE_KEY_SUFFIX: &str = "_V1";

// ==========================================
// CacheName - 命名缓存
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheName {
    WorkOrders,
    Assets,
    Vendors,
    Slas,
    Branches,
    MinimumLevels,
    TankLogs,
    ReplenishmentRequests,
    Deliveries,
    MaintenanceTasks,
}

impl CacheName {
    pub const ALL: [CacheName; 10] = [
        CacheName::WorkOrders,
        CacheName::Assets,
        CacheName::Vendors,
        CacheName::Slas,
        CacheName::Branches,
        CacheName::MinimumLevels,
        CacheName::TankLogs,
        CacheName::ReplenishmentRequests,
        CacheName::Deliveries,
        CacheName::MaintenanceTasks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheName::WorkOrders => "work_orders",
            CacheName::Assets => "assets",
            CacheName::Vendors => "vendors",
            CacheName::Slas => "slas",
            CacheName::Branches => "branches",
            CacheName::MinimumLevels => "minimum_levels",
            CacheName::TankLogs => "tank_logs",
            CacheName::ReplenishmentRequests => "replenishment_requests",
            CacheName::Deliveries => "deliveries",
            CacheName::MaintenanceTasks => "maintenance_tasks",
        }
    }

    /// 实际存储键, 例如 "work_orders_V1"
    pub fn storage_key(&self) -> String {
        format!("{}{}", self.as_str(), CACHE_KEY_SUFFIX)
    }
}

impl fmt::Display for CacheName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// Trait: CacheStore
// ==========================================
// 原始 JSON 层接口, 类型化读写见 CollectionRepository
pub trait CacheStore: Send + Sync {
    /// 读取缓存原始内容, 未写入过返回 None
    fn read_raw(&self, cache: CacheName) -> RepositoryResult<Option<String>>;

    /// 整体替换缓存内容
    fn write_raw(&self, cache: CacheName, payload: &str) -> RepositoryResult<()>;

    /// 清空缓存
    fn clear(&self, cache: CacheName) -> RepositoryResult<()>;
}
