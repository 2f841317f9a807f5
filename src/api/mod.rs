// ==========================================
// 设施资产管理系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口, 供命令行/驾驶舱调用
// ==========================================

pub mod asset_api;
pub mod config_api;
pub mod dashboard_api;
pub mod error;
pub mod maintenance_api;
pub mod tanker_api;
pub mod validator;
pub mod work_order_api;

// 重导出核心类型
pub use asset_api::AssetApi;
pub use config_api::ConfigApi;
pub use dashboard_api::{DashboardApi, DashboardSummary};
pub use error::{ApiError, ApiResult, FieldViolation};
pub use maintenance_api::MaintenanceApi;
pub use tanker_api::TankerApi;
pub use work_order_api::{AssignmentOutcome, SlaPreview, WorkOrderApi};
