// ==========================================
// 设施资产管理系统 - 水车补给 API
// ==========================================
// 职责: 最低液位设置, 液位记录, 补水申请/审核, 送水登记
// 红线: 送水只能引用已审核通过的申请
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::validate_tank_log_draft;
use crate::domain::tanker::{
    Delivery, DeliveryDraft, MinimumLevel, ReplenishmentDraft, ReplenishmentRequest, TankLog,
    TankLogDraft,
};
use crate::domain::types::RequestStatus;
use crate::engine::{AuditSampler, TankerWorkflow};
use crate::repository::{RepositoryError, Repositories};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Mutex;

pub struct TankerApi {
    repos: Repositories,
    workflow: TankerWorkflow,
    sampler: Mutex<Box<dyn AuditSampler>>,
}

impl TankerApi {
    pub fn new(repos: Repositories, workflow: TankerWorkflow, sampler: Box<dyn AuditSampler>) -> Self {
        Self {
            repos,
            workflow,
            sampler: Mutex::new(sampler),
        }
    }

    fn ensure_branch(&self, branch_id: &str) -> ApiResult<()> {
        let branches = self.repos.branches.get_all()?;
        if branches.iter().any(|b| b.id == branch_id) {
            Ok(())
        } else {
            Err(RepositoryError::not_found("Branch", branch_id).into())
        }
    }

    // ==========================================
    // 最低液位
    // ==========================================

    pub fn set_minimum_level(
        &self,
        branch_id: &str,
        minimum_level: f64,
        effective_from: NaiveDate,
    ) -> ApiResult<MinimumLevel> {
        self.ensure_branch(branch_id)?;
        self.repos.minimum_levels.update(|minimums| {
            Ok::<_, ApiError>(self.workflow.set_minimum_level(
                minimums,
                branch_id,
                minimum_level,
                effective_from,
            )?)
        })
    }

    pub fn get_active_minimum(&self, branch_id: &str) -> ApiResult<Option<MinimumLevel>> {
        let minimums = self.repos.minimum_levels.get_all()?;
        Ok(self.workflow.active_minimum(branch_id, &minimums).cloned())
    }

    // ==========================================
    // 液位记录
    // ==========================================

    pub fn record_tank_level(&self, draft: TankLogDraft, now: NaiveDateTime) -> ApiResult<TankLog> {
        validate_tank_log_draft(&draft)?;
        self.ensure_branch(&draft.branch_id)?;
        let level = draft
            .recorded_level
            .ok_or_else(|| ApiError::InternalError("液位表单校验不完整".to_string()))?;

        let minimums = self.repos.minimum_levels.get_all()?;
        let log = self
            .workflow
            .record_tank_level(&draft.branch_id, level, &minimums, now)?;

        self.repos.tank_logs.update(|logs| {
            logs.push(log.clone());
            Ok::<_, ApiError>(())
        })?;
        Ok(log)
    }

    pub fn list_tank_logs(&self, branch_id: Option<&str>) -> ApiResult<Vec<TankLog>> {
        let logs = self.repos.tank_logs.get_all()?;
        Ok(match branch_id {
            Some(b) => logs.into_iter().filter(|l| l.branch_id == b).collect(),
            None => logs,
        })
    }

    // ==========================================
    // 补水申请
    // ==========================================

    pub fn create_request(
        &self,
        draft: ReplenishmentDraft,
        now: NaiveDateTime,
    ) -> ApiResult<ReplenishmentRequest> {
        self.ensure_branch(&draft.branch_id)?;
        let logs = self.repos.tank_logs.get_all()?;
        let request = self.workflow.create_request(&draft, &logs, now)?;

        self.repos.replenishment_requests.update(|requests| {
            requests.push(request.clone());
            Ok::<_, ApiError>(())
        })?;
        Ok(request)
    }

    pub fn list_requests(&self, status: Option<RequestStatus>) -> ApiResult<Vec<ReplenishmentRequest>> {
        let requests = self.repos.replenishment_requests.get_all()?;
        Ok(match status {
            Some(s) => requests.into_iter().filter(|r| r.status == s).collect(),
            None => requests,
        })
    }

    /// 审核补水申请
    pub fn review_request(
        &self,
        request_id: &str,
        decision: RequestStatus,
        notes: Option<String>,
        now: NaiveDateTime,
    ) -> ApiResult<ReplenishmentRequest> {
        self.with_request(request_id, |request| {
            self.workflow.review(request, decision, notes, now)?;
            tracing::info!(request_id, decision = %decision, "补水申请已审核");
            Ok(())
        })
    }

    /// 整改后重新提交
    pub fn resubmit_request(&self, request_id: &str) -> ApiResult<ReplenishmentRequest> {
        self.with_request(request_id, |request| Ok(self.workflow.resubmit(request)?))
    }

    // ==========================================
    // 送水登记
    // ==========================================

    pub fn log_delivery(&self, draft: DeliveryDraft, now: NaiveDateTime) -> ApiResult<Delivery> {
        let requests = self.repos.replenishment_requests.get_all()?;
        let request = requests
            .iter()
            .find(|r| r.id == draft.request_id)
            .ok_or_else(|| {
                ApiError::from(RepositoryError::not_found(
                    "ReplenishmentRequest",
                    &draft.request_id,
                ))
            })?;

        let delivery = {
            let mut sampler = self
                .sampler
                .lock()
                .map_err(|e| ApiError::InternalError(format!("抽样器锁获取失败: {}", e)))?;
            self.workflow
                .log_delivery(&draft, request, sampler.as_mut(), now)?
        };

        self.repos.deliveries.update(|deliveries| {
            deliveries.push(delivery.clone());
            Ok::<_, ApiError>(())
        })?;
        if delivery.flagged_for_audit {
            tracing::info!(delivery_id = %delivery.id, "送水记录被抽中审计");
        }
        Ok(delivery)
    }

    pub fn list_deliveries(&self) -> ApiResult<Vec<Delivery>> {
        Ok(self.repos.deliveries.get_all()?)
    }

    fn with_request<F>(&self, request_id: &str, f: F) -> ApiResult<ReplenishmentRequest>
    where
        F: FnOnce(&mut ReplenishmentRequest) -> ApiResult<()>,
    {
        self.repos.replenishment_requests.update(|requests| {
            let request = requests
                .iter_mut()
                .find(|r| r.id == request_id)
                .ok_or_else(|| {
                    ApiError::from(RepositoryError::not_found("ReplenishmentRequest", request_id))
                })?;
            f(request)?;
            Ok(request.clone())
        })
    }
}
