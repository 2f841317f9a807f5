// ==========================================
// 设施资产管理系统 - 工单领域模型
// ==========================================
// 不变量: status = Closed 必须携带 completion_date
// ==========================================

use crate::domain::sla::Sla;
use crate::domain::types::{Priority, SlaStatus, WorkOrderStatus, WorkOrderType};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// WorkOrder - 工单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    // ===== 标识 =====
    pub id: String,
    pub title: String,

    // ===== 关联 =====
    pub asset_id: String,
    #[serde(default)]
    pub vendor_id: Option<String>,
    #[serde(default)]
    pub sla_id: Option<String>, // 派单时匹配到的 SLA

    // ===== 分类 =====
    pub priority: Priority,
    pub status: WorkOrderStatus,
    pub work_order_type: WorkOrderType,

    // ===== 时间 =====
    pub created_date: NaiveDateTime,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub completion_date: Option<NaiveDateTime>,

    // ===== SLA =====
    #[serde(default)]
    pub sla_status: Option<SlaStatus>,
}

impl WorkOrder {
    /// 是否仍在处理中（非关闭、非取消）
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    /// 是否超期
    ///
    /// 按天比较: 当天到期不算超期
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_active() && self.due_date < today
    }

    /// 处理耗时（小时），仅对已关闭且有完成时间的工单有效
    pub fn resolution_hours(&self) -> Option<f64> {
        if self.status != WorkOrderStatus::Closed {
            return None;
        }
        self.completion_date
            .map(|done| (done - self.created_date).num_seconds() as f64 / 3600.0)
    }

    /// 按完成时间判定 SLA 达成情况
    ///
    /// - 有 SLA: 创建到完成的分钟数 ≤ resolution_time × 60 → Met
    /// - 无 SLA: 完成日期 ≤ due_date → Met
    pub fn sla_outcome(&self, completed_at: NaiveDateTime, governing: Option<&Sla>) -> SlaStatus {
        let met = match governing {
            Some(sla) => {
                let elapsed_minutes = (completed_at - self.created_date).num_minutes();
                elapsed_minutes <= i64::from(sla.resolution_time) * 60
            }
            None => completed_at.date() <= self.due_date,
        };
        if met {
            SlaStatus::Met
        } else {
            SlaStatus::Breached
        }
    }
}

// ==========================================
// WorkOrderDraft - 新建工单表单
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderDraft {
    pub title: String,
    pub asset_id: String,
    pub priority: Option<Priority>,
    pub work_order_type: Option<WorkOrderType>,
    pub due_date: Option<NaiveDate>,
}
