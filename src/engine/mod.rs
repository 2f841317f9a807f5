// ==========================================
// 设施资产管理系统 - 引擎层
// ==========================================
// 职责: 实现业务规则, 全部为纯函数式计算 (输入集合 → 派生结果)
// 红线: Engine 不访问存储; today/now/随机源均由调用方注入
// ==========================================

pub mod audit_sampler;
pub mod error;
pub mod maintenance_calendar;
pub mod sla_matcher;
pub mod tanker_workflow;
pub mod work_order_lifecycle;
pub mod work_order_metrics;

// 重导出核心引擎
pub use audit_sampler::{
    AuditSampler, FixedAuditSampler, RandomAuditSampler, DEFAULT_AUDIT_SAMPLE_RATE,
};
pub use error::{WorkflowError, WorkflowResult};
pub use maintenance_calendar::MaintenanceCalendarProjector;
pub use sla_matcher::{SlaAdvisory, SlaMatch, SlaMatcher};
pub use tanker_workflow::{TankerPolicy, TankerWorkflow};
pub use work_order_lifecycle::WorkOrderLifecycle;
pub use work_order_metrics::{
    percentage, PriorityBreakdown, WorkOrderMetrics, WorkOrderMetricsEngine,
};
