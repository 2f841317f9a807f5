// ==========================================
// 设施资产管理系统 - 核心库
// ==========================================
// 范围: 工单/SLA, 预防性维护日历, 水车补给流程
// 技术栈: Rust + SQLite (命名缓存整体读写)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 命名缓存访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    EventStatus, MaintenanceType, Priority, RequestStatus, RequestType, SlaStatus, TaskStatus,
    WorkOrderStatus, WorkOrderType,
};

// 领域实体
pub use domain::{
    Asset, AssetCategory, Branch, CalendarMonth, Delivery, MaintenanceCalendar, MaintenanceTask,
    MinimumLevel, ReplenishmentRequest, Sla, TankLog, Vendor, WorkOrder,
};

// 引擎
pub use engine::{
    MaintenanceCalendarProjector, SlaMatcher, TankerWorkflow, WorkOrderLifecycle,
    WorkOrderMetricsEngine,
};

// API
pub use api::{DashboardApi, MaintenanceApi, TankerApi, WorkOrderApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "设施资产管理系统";
