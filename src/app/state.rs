// ==========================================
// 设施资产管理系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{
    AssetApi, ConfigApi, DashboardApi, MaintenanceApi, TankerApi, WorkOrderApi,
};
use crate::config::config_manager::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection};
use crate::engine::{RandomAuditSampler, TankerWorkflow};
use crate::repository::{CacheStore, Repositories, SqliteCacheStore};

/// 应用状态
///
/// 包含所有API实例和共享资源, 缓存存储与配置共用一个连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 命名缓存仓储
    pub repos: Repositories,

    /// 工单API
    pub work_order_api: Arc<WorkOrderApi>,

    /// 维护API
    pub maintenance_api: Arc<MaintenanceApi>,

    /// 水车补给API
    pub tanker_api: Arc<TankerApi>,

    /// 资产API
    pub asset_api: Arc<AssetApi>,

    /// 驾驶舱API
    pub dashboard_api: Arc<DashboardApi>,

    /// 配置管理API
    pub config_api: Arc<ConfigApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 说明
    /// 1. 打开共享连接并建表
    /// 2. 读取水车流程配置, 构造审计抽样器
    /// 3. 创建所有API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("无法初始化数据库结构: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        let store: Arc<dyn CacheStore> = Arc::new(SqliteCacheStore::from_connection(conn.clone()));
        let repos = Repositories::new(store);

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn)
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let policy = config_manager
            .get_tanker_policy()
            .map_err(|e| format!("无法读取水车流程配置: {}", e))?;
        let sample_rate = config_manager
            .get_audit_sample_rate()
            .map_err(|e| format!("无法读取审计抽样率: {}", e))?;
        tracing::debug!(?policy, sample_rate, "水车流程配置已加载");

        let tanker_api = TankerApi::new(
            repos.clone(),
            TankerWorkflow::new(policy),
            Box::new(RandomAuditSampler::new(sample_rate)),
        );

        Ok(Self {
            db_path,
            work_order_api: Arc::new(WorkOrderApi::new(repos.clone())),
            maintenance_api: Arc::new(MaintenanceApi::new(repos.clone())),
            tanker_api: Arc::new(tanker_api),
            asset_api: Arc::new(AssetApi::new(repos.clone())),
            dashboard_api: Arc::new(DashboardApi::new(repos.clone())),
            config_api: Arc::new(ConfigApi::new(config_manager)),
            repos,
        })
    }

    /// 获取数据库路径
    pub fn get_db_path(&self) -> &str {
        &self.db_path
    }
}

// ==========================================
// 默认数据库路径辅助函数
// ==========================================

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "FACILITY_OPS_DB_PATH";

/// 获取默认数据库路径
///
/// # 返回
/// - FACILITY_OPS_DB_PATH 非空时直接使用
/// - 否则: 用户数据目录/facility-ops/facility_ops.db
/// - 拿不到用户数据目录时: ./facility_ops.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./facility_ops.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("facility-ops");
        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("facility_ops.db");
        }
    }

    path.to_string_lossy().to_string()
}
