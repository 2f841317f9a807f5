// ==========================================
// 设施资产管理系统 - 领域类型定义
// ==========================================
// 序列化格式: 与前端缓存 JSON 保持一致 (显示文本即存储值)
// ==========================================

use crate::domain::sla::parse_priority_tier;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 工单优先级 (Priority)
// ==========================================
// 顺序: Low < Medium < High < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// 全部优先级（按严重程度降序，用于积压统计展示）
    pub const ALL: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    /// 对应的 SLA 优先级档位
    ///
    /// Critical→1, High→2, Medium→3, Low→4
    pub fn sla_tier(&self) -> u8 {
        match self {
            Priority::Critical => 1,
            Priority::High => 2,
            Priority::Medium => 3,
            Priority::Low => 4,
        }
    }

    /// 固定的 SLA 优先级标签 ("Priority 1" ~ "Priority 4")
    pub fn sla_label(&self) -> String {
        format!("Priority {}", self.sla_tier())
    }

    /// SLA 档位 → 优先级
    pub fn from_sla_tier(tier: u8) -> Option<Self> {
        match tier {
            1 => Some(Priority::Critical),
            2 => Some(Priority::High),
            3 => Some(Priority::Medium),
            4 => Some(Priority::Low),
            _ => None,
        }
    }

    /// 从字符串解析（大小写不敏感, 也接受 "Priority N" 标签）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "critical" => Some(Priority::Critical),
            _ => parse_priority_tier(s).and_then(Self::from_sla_tier),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
            Priority::Critical => write!(f, "Critical"),
        }
    }
}

// ==========================================
// 工单状态 (Work Order Status)
// ==========================================
// 兼容旧缓存: "Pending" 视为 Open, "Completed" 视为 Closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkOrderStatus {
    #[serde(alias = "Pending")]
    Open,
    Assigned,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(alias = "Completed")]
    Closed,
    Cancelled,
}

impl WorkOrderStatus {
    /// 是否终态（关闭/取消）
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkOrderStatus::Closed | WorkOrderStatus::Cancelled)
    }

    /// 状态转换是否合法
    ///
    /// Open → Assigned | InProgress | Cancelled
    /// Assigned → InProgress | Cancelled
    /// InProgress → Closed | Cancelled
    pub fn can_transition_to(&self, next: WorkOrderStatus) -> bool {
        use WorkOrderStatus::*;
        matches!(
            (self, next),
            (Open, Assigned)
                | (Open, InProgress)
                | (Open, Cancelled)
                | (Assigned, InProgress)
                | (Assigned, Cancelled)
                | (InProgress, Closed)
                | (InProgress, Cancelled)
        )
    }

    /// 从字符串解析（接受别名）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" | "pending" => Some(WorkOrderStatus::Open),
            "assigned" => Some(WorkOrderStatus::Assigned),
            "in progress" | "in_progress" => Some(WorkOrderStatus::InProgress),
            "closed" | "completed" => Some(WorkOrderStatus::Closed),
            "cancelled" | "canceled" => Some(WorkOrderStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkOrderStatus::Open => write!(f, "Open"),
            WorkOrderStatus::Assigned => write!(f, "Assigned"),
            WorkOrderStatus::InProgress => write!(f, "In Progress"),
            WorkOrderStatus::Closed => write!(f, "Closed"),
            WorkOrderStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

// ==========================================
// SLA 达成状态 (SLA Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlaStatus {
    Met,
    Breached,
}

impl fmt::Display for SlaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlaStatus::Met => write!(f, "Met"),
            SlaStatus::Breached => write!(f, "Breached"),
        }
    }
}

// ==========================================
// 工单类型 (Work Order Type)
// ==========================================
// PPM: 计划性预防维护; Reactive: 按需/故障维修
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkOrderType {
    #[serde(rename = "PPM")]
    Ppm,
    #[serde(alias = "Corrective", alias = "On-Demand")]
    Reactive,
}

impl WorkOrderType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PPM" => Some(WorkOrderType::Ppm),
            "REACTIVE" | "CORRECTIVE" | "ON-DEMAND" => Some(WorkOrderType::Reactive),
            _ => None,
        }
    }
}

impl fmt::Display for WorkOrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkOrderType::Ppm => write!(f, "PPM"),
            WorkOrderType::Reactive => write!(f, "Reactive"),
        }
    }
}

// ==========================================
// 维护任务类型 / 状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceType {
    Preventive,
    Reactive,
}

impl From<WorkOrderType> for MaintenanceType {
    fn from(t: WorkOrderType) -> Self {
        match t {
            WorkOrderType::Ppm => MaintenanceType::Preventive,
            WorkOrderType::Reactive => MaintenanceType::Reactive,
        }
    }
}

impl fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaintenanceType::Preventive => write!(f, "PREVENTIVE"),
            MaintenanceType::Reactive => write!(f, "REACTIVE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Scheduled,
    Completed,
}

// ==========================================
// 日历事件状态 (Calendar Event Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Overdue,
    Completed,
    Scheduled,
}

// ==========================================
// 补水申请类型 / 状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    Regular,
    Emergency,
}

/// 补水申请状态机
///
/// Pending Review → Approved | Rejected | Remediation Required
/// Remediation Required → Pending Review (重新提交)
/// 终态: Approved, Rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    #[serde(rename = "Pending Review")]
    PendingReview,
    Approved,
    Rejected,
    #[serde(rename = "Remediation Required")]
    RemediationRequired,
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Approved | RequestStatus::Rejected)
    }

    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, next),
            (PendingReview, Approved)
                | (PendingReview, Rejected)
                | (PendingReview, RemediationRequired)
                | (RemediationRequired, PendingReview)
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::PendingReview => write!(f, "Pending Review"),
            RequestStatus::Approved => write!(f, "Approved"),
            RequestStatus::Rejected => write!(f, "Rejected"),
            RequestStatus::RemediationRequired => write!(f, "Remediation Required"),
        }
    }
}
