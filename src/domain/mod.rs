// ==========================================
// 设施资产管理系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod asset;
pub mod maintenance;
pub mod sla;
pub mod tanker;
pub mod types;
pub mod work_order;

// 重导出核心类型
pub use asset::{Asset, AssetCategory, Branch, Vendor};
pub use maintenance::{
    CalendarEvent, CalendarMonth, MaintenanceCalendar, MaintenanceTask, MaintenanceTaskDraft,
};
pub use sla::Sla;
pub use tanker::{
    Delivery, DeliveryDraft, MinimumLevel, ReplenishmentDraft, ReplenishmentRequest, TankLog,
    TankLogDraft,
};
pub use types::{
    EventStatus, MaintenanceType, Priority, RequestStatus, RequestType, SlaStatus, TaskStatus,
    WorkOrderStatus, WorkOrderType,
};
pub use work_order::{WorkOrder, WorkOrderDraft};
