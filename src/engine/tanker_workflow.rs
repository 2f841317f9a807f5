// ==========================================
// 设施资产管理系统 - 水车补给流程引擎
// ==========================================
// 流程:
// 1) 液位记录: below_minimum = recorded_level < 当前生效最低液位 (只在创建时计算)
// 2) 补水申请: Regular 需引用本分支低于最低液位的记录; Emergency 可跳过 (可配置)
//    flagged_for_audit = (request_type == Emergency), 创建后不变
// 3) 审核: Pending Review → Approved | Rejected | Remediation Required
// 4) 送水: 仅引用 Approved 申请; 抽样审计
// ==========================================

use crate::domain::tanker::{
    Delivery, DeliveryDraft, MinimumLevel, ReplenishmentDraft, ReplenishmentRequest, TankLog,
};
use crate::domain::types::{RequestStatus, RequestType};
use crate::engine::audit_sampler::AuditSampler;
use crate::engine::error::{WorkflowError, WorkflowResult};
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

/// 流程参数
#[derive(Debug, Clone, Copy)]
pub struct TankerPolicy {
    /// Emergency 申请是否跳过低液位校验
    pub emergency_bypasses_minimum: bool,
}

impl Default for TankerPolicy {
    fn default() -> Self {
        Self {
            emergency_bypasses_minimum: true,
        }
    }
}

fn positive(field: &str, value: f64) -> WorkflowResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(WorkflowError::InvalidValue {
            field: field.to_string(),
            message: format!("必须为正数, 实际 {}", value),
        })
    }
}

// ==========================================
// TankerWorkflow
// ==========================================
#[derive(Debug, Default)]
pub struct TankerWorkflow {
    policy: TankerPolicy,
}

impl TankerWorkflow {
    pub fn new(policy: TankerPolicy) -> Self {
        Self { policy }
    }

    // ==========================================
    // 最低液位
    // ==========================================

    /// 分支当前生效的最低液位
    ///
    /// active 记录中 effective_from 最新者; 相同时取集合中第一条
    pub fn active_minimum<'a>(
        &self,
        branch_id: &str,
        minimums: &'a [MinimumLevel],
    ) -> Option<&'a MinimumLevel> {
        let mut best: Option<&'a MinimumLevel> = None;
        for m in minimums
            .iter()
            .filter(|m| m.active && m.branch_id == branch_id)
        {
            if best.map_or(true, |b| m.effective_from > b.effective_from) {
                best = Some(m);
            }
        }
        best
    }

    /// 设置新的最低液位, 同分支旧记录全部失效
    pub fn set_minimum_level(
        &self,
        minimums: &mut Vec<MinimumLevel>,
        branch_id: &str,
        minimum_level: f64,
        effective_from: NaiveDate,
    ) -> WorkflowResult<MinimumLevel> {
        let minimum_level = positive("minimumLevel", minimum_level)?;
        for m in minimums.iter_mut().filter(|m| m.branch_id == branch_id) {
            m.active = false;
        }
        let record = MinimumLevel {
            id: Uuid::new_v4().to_string(),
            branch_id: branch_id.to_string(),
            minimum_level,
            effective_from,
            active: true,
        };
        minimums.push(record.clone());
        Ok(record)
    }

    // ==========================================
    // 液位记录
    // ==========================================

    /// 创建液位记录
    ///
    /// 无生效最低液位时 below_minimum = false
    pub fn record_tank_level(
        &self,
        branch_id: &str,
        recorded_level: f64,
        minimums: &[MinimumLevel],
        now: NaiveDateTime,
    ) -> WorkflowResult<TankLog> {
        if !recorded_level.is_finite() || recorded_level < 0.0 {
            return Err(WorkflowError::InvalidValue {
                field: "recordedLevel".to_string(),
                message: format!("液位不能为负数, 实际 {}", recorded_level),
            });
        }

        let threshold = self
            .active_minimum(branch_id, minimums)
            .map(|m| m.minimum_level);
        let below_minimum = threshold.map_or(false, |min| recorded_level < min);

        if below_minimum {
            tracing::info!(branch_id, recorded_level, ?threshold, "液位低于最低液位");
        }

        Ok(TankLog {
            id: Uuid::new_v4().to_string(),
            branch_id: branch_id.to_string(),
            recorded_level,
            recorded_at: now,
            minimum_level_at_log: threshold,
            below_minimum,
        })
    }

    // ==========================================
    // 补水申请
    // ==========================================

    /// 创建补水申请
    pub fn create_request(
        &self,
        draft: &ReplenishmentDraft,
        tank_logs: &[TankLog],
        now: NaiveDateTime,
    ) -> WorkflowResult<ReplenishmentRequest> {
        let requested_volume = positive("requestedVolume", draft.requested_volume)?;

        let bypass = draft.request_type == RequestType::Emergency
            && self.policy.emergency_bypasses_minimum;
        if !bypass {
            self.check_eligibility(draft, tank_logs)?;
        }

        let request = ReplenishmentRequest {
            id: Uuid::new_v4().to_string(),
            branch_id: draft.branch_id.clone(),
            tank_log_id: draft.tank_log_id.clone(),
            request_type: draft.request_type,
            requested_volume,
            status: RequestStatus::PendingReview,
            flagged_for_audit: draft.request_type == RequestType::Emergency,
            created_at: now,
            reviewed_at: None,
            review_notes: None,
        };
        tracing::info!(
            request_id = %request.id,
            branch_id = %request.branch_id,
            flagged_for_audit = request.flagged_for_audit,
            "补水申请已创建"
        );
        Ok(request)
    }

    fn check_eligibility(
        &self,
        draft: &ReplenishmentDraft,
        tank_logs: &[TankLog],
    ) -> WorkflowResult<()> {
        let log_id = draft
            .tank_log_id
            .as_deref()
            .ok_or_else(|| WorkflowError::NotEligible("未关联液位记录".to_string()))?;

        let log = tank_logs
            .iter()
            .find(|l| l.id == log_id)
            .ok_or_else(|| WorkflowError::NotEligible(format!("液位记录不存在: {}", log_id)))?;

        if log.branch_id != draft.branch_id {
            return Err(WorkflowError::NotEligible(format!(
                "液位记录 {} 不属于分支 {}",
                log_id, draft.branch_id
            )));
        }
        if !log.below_minimum {
            return Err(WorkflowError::NotEligible(format!(
                "液位记录 {} 未低于最低液位",
                log_id
            )));
        }
        Ok(())
    }

    /// 审核补水申请
    ///
    /// 只接受 Approved / Rejected / Remediation Required
    pub fn review(
        &self,
        request: &mut ReplenishmentRequest,
        decision: RequestStatus,
        notes: Option<String>,
        now: NaiveDateTime,
    ) -> WorkflowResult<()> {
        if decision == RequestStatus::PendingReview || !request.status.can_transition_to(decision) {
            return Err(WorkflowError::transition(
                "ReplenishmentRequest",
                request.status,
                decision,
            ));
        }
        request.status = decision;
        request.reviewed_at = Some(now);
        request.review_notes = notes;
        Ok(())
    }

    /// 整改后重新提交: Remediation Required → Pending Review
    pub fn resubmit(&self, request: &mut ReplenishmentRequest) -> WorkflowResult<()> {
        if !request.status.can_transition_to(RequestStatus::PendingReview) {
            return Err(WorkflowError::transition(
                "ReplenishmentRequest",
                request.status,
                RequestStatus::PendingReview,
            ));
        }
        request.status = RequestStatus::PendingReview;
        request.reviewed_at = None;
        Ok(())
    }

    // ==========================================
    // 送水登记
    // ==========================================

    /// 登记送水
    ///
    /// 红线: 申请必须已审核通过
    pub fn log_delivery(
        &self,
        draft: &DeliveryDraft,
        request: &ReplenishmentRequest,
        sampler: &mut dyn AuditSampler,
        now: NaiveDateTime,
    ) -> WorkflowResult<Delivery> {
        if request.status != RequestStatus::Approved {
            return Err(WorkflowError::RequestNotApproved {
                request_id: request.id.clone(),
                status: request.status.to_string(),
            });
        }
        let volume_delivered = positive("volumeDelivered", draft.volume_delivered)?;

        Ok(Delivery {
            id: Uuid::new_v4().to_string(),
            request_id: request.id.clone(),
            branch_id: request.branch_id.clone(),
            volume_delivered,
            delivered_at: now,
            flagged_for_audit: sampler.should_flag(),
        })
    }
}
