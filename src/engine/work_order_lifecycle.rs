// ==========================================
// 设施资产管理系统 - 工单生命周期引擎
// ==========================================
// 状态机: Open → Assigned → In Progress → Closed
//         Open → In Progress (内部自修)
//         非终态 → Cancelled
// 红线: Closed 必须携带 completion_date
// ==========================================

use crate::domain::sla::Sla;
use crate::domain::types::{SlaStatus, WorkOrderStatus};
use crate::domain::work_order::WorkOrder;
use crate::engine::error::{WorkflowError, WorkflowResult};
use crate::engine::sla_matcher::{SlaAdvisory, SlaMatcher};
use chrono::NaiveDateTime;

#[derive(Debug, Default)]
pub struct WorkOrderLifecycle {
    matcher: SlaMatcher,
}

impl WorkOrderLifecycle {
    pub fn new() -> Self {
        Self {
            matcher: SlaMatcher::new(),
        }
    }

    fn transition(order: &mut WorkOrder, next: WorkOrderStatus) -> WorkflowResult<()> {
        if !order.status.can_transition_to(next) {
            return Err(WorkflowError::transition("WorkOrder", order.status, next));
        }
        order.status = next;
        Ok(())
    }

    /// 派单: 记录供应商, 匹配 SLA, 状态 → Assigned
    ///
    /// 返回 SLA 匹配提示（无提示时为 None）
    pub fn assign(
        &self,
        order: &mut WorkOrder,
        vendor_id: &str,
        slas: &[Sla],
    ) -> WorkflowResult<Option<SlaAdvisory>> {
        Self::transition(order, WorkOrderStatus::Assigned)?;
        let matched = self.matcher.match_sla(order.priority, Some(vendor_id), slas);
        order.vendor_id = Some(vendor_id.to_string());
        order.sla_id = matched.sla_id();
        tracing::info!(
            work_order_id = %order.id,
            vendor_id,
            sla_id = ?order.sla_id,
            "工单已派单"
        );
        Ok(matched.advisory)
    }

    /// 开工: 状态 → In Progress
    pub fn start(&self, order: &mut WorkOrder) -> WorkflowResult<()> {
        Self::transition(order, WorkOrderStatus::InProgress)
    }

    /// 关闭: 写入完成时间并判定 SLA 达成情况
    ///
    /// - 有 SLA: 创建到完成的小时数 ≤ resolution_time → Met
    /// - 无 SLA: 完成日期 ≤ due_date → Met
    pub fn close(
        &self,
        order: &mut WorkOrder,
        completed_at: NaiveDateTime,
        slas: &[Sla],
    ) -> WorkflowResult<SlaStatus> {
        if completed_at < order.created_date {
            return Err(WorkflowError::InvalidValue {
                field: "completionDate".to_string(),
                message: format!(
                    "完成时间 {} 早于创建时间 {}",
                    completed_at, order.created_date
                ),
            });
        }
        Self::transition(order, WorkOrderStatus::Closed)?;

        let governing = order
            .sla_id
            .as_deref()
            .and_then(|id| slas.iter().find(|s| s.id == id));

        let status = order.sla_outcome(completed_at, governing);

        order.completion_date = Some(completed_at);
        order.sla_status = Some(status);
        Ok(status)
    }

    /// 取消: 非终态 → Cancelled
    pub fn cancel(&self, order: &mut WorkOrder) -> WorkflowResult<()> {
        Self::transition(order, WorkOrderStatus::Cancelled)
    }
}
