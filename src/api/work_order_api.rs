// ==========================================
// 设施资产管理系统 - 工单 API
// ==========================================
// 职责: 工单新建/派单/开工/关闭/取消, SLA 预览, 指标查询, CSV 导入
// 架构: API 层 → Engine 层 (纯计算) → Repository 层 (整体读写)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::validate_work_order_draft;
use crate::domain::sla::Sla;
use crate::domain::types::{Priority, WorkOrderStatus};
use crate::domain::work_order::{WorkOrder, WorkOrderDraft};
use crate::engine::{
    SlaAdvisory, SlaMatcher, WorkOrderLifecycle, WorkOrderMetrics, WorkOrderMetricsEngine,
};
use crate::importer::WorkOrderCsvImporter;
use crate::repository::{RepositoryError, Repositories};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

/// 派单结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentOutcome {
    pub work_order: WorkOrder,
    pub advisory: Option<SlaAdvisory>,
}

/// SLA 预览（表单中选择优先级/供应商时展示）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaPreview {
    pub sla: Option<Sla>,
    pub advisory: Option<SlaAdvisory>,
}

// ==========================================
// WorkOrderApi
// ==========================================
pub struct WorkOrderApi {
    repos: Repositories,
    lifecycle: WorkOrderLifecycle,
    matcher: SlaMatcher,
    metrics: WorkOrderMetricsEngine,
}

impl WorkOrderApi {
    pub fn new(repos: Repositories) -> Self {
        Self {
            repos,
            lifecycle: WorkOrderLifecycle::new(),
            matcher: SlaMatcher::new(),
            metrics: WorkOrderMetricsEngine::new(),
        }
    }

    // ==========================================
    // 查询接口
    // ==========================================

    pub fn list_work_orders(&self) -> ApiResult<Vec<WorkOrder>> {
        Ok(self.repos.work_orders.get_all()?)
    }

    pub fn get_work_order(&self, id: &str) -> ApiResult<WorkOrder> {
        self.repos
            .work_orders
            .get_all()?
            .into_iter()
            .find(|o| o.id == id)
            .ok_or_else(|| RepositoryError::not_found("WorkOrder", id).into())
    }

    /// 超期工单
    pub fn list_overdue(&self, today: NaiveDate) -> ApiResult<Vec<WorkOrder>> {
        let orders = self.repos.work_orders.get_all()?;
        Ok(self
            .metrics
            .overdue_set(&orders, today)
            .into_iter()
            .cloned()
            .collect())
    }

    /// 工单指标
    pub fn get_metrics(&self, today: NaiveDate) -> ApiResult<WorkOrderMetrics> {
        let orders = self.repos.work_orders.get_all()?;
        Ok(self.metrics.compute(&orders, today))
    }

    /// SLA 预览
    pub fn preview_sla(&self, priority: Priority, vendor_id: Option<&str>) -> ApiResult<SlaPreview> {
        let slas = self.repos.slas.get_all()?;
        let matched = self.matcher.match_sla(priority, vendor_id, &slas);
        Ok(SlaPreview {
            sla: matched.sla.cloned(),
            advisory: matched.advisory,
        })
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 新建工单
    ///
    /// 校验失败时不写入
    pub fn create_work_order(
        &self,
        draft: WorkOrderDraft,
        now: NaiveDateTime,
    ) -> ApiResult<WorkOrder> {
        validate_work_order_draft(&draft, now.date())?;

        let assets = self.repos.assets.get_all()?;
        if !assets.iter().any(|a| a.id == draft.asset_id) {
            return Err(RepositoryError::not_found("Asset", &draft.asset_id).into());
        }

        let (priority, work_order_type, due_date) =
            match (draft.priority, draft.work_order_type, draft.due_date) {
                (Some(p), Some(t), Some(d)) => (p, t, d),
                _ => return Err(ApiError::InternalError("工单表单校验不完整".to_string())),
            };

        let order = WorkOrder {
            id: Uuid::new_v4().to_string(),
            title: draft.title.trim().to_string(),
            asset_id: draft.asset_id,
            vendor_id: None,
            sla_id: None,
            priority,
            status: WorkOrderStatus::Open,
            work_order_type,
            created_date: now,
            due_date,
            completion_date: None,
            sla_status: None,
        };

        self.repos.work_orders.update(|orders| {
            orders.push(order.clone());
            Ok::<_, ApiError>(())
        })?;
        tracing::info!(work_order_id = %order.id, priority = %order.priority, "工单已创建");
        Ok(order)
    }

    /// 派单给供应商
    pub fn assign_vendor(&self, id: &str, vendor_id: &str) -> ApiResult<AssignmentOutcome> {
        let vendors = self.repos.vendors.get_all()?;
        match vendors.iter().find(|v| v.id == vendor_id) {
            None => return Err(RepositoryError::not_found("Vendor", vendor_id).into()),
            Some(v) if !v.active => {
                return Err(ApiError::BusinessRuleViolation(format!(
                    "供应商 {} 已停用",
                    vendor_id
                )))
            }
            Some(_) => {}
        }

        let slas = self.repos.slas.get_all()?;
        let (work_order, advisory) = self.with_order(id, |order| {
            let advisory = self.lifecycle.assign(order, vendor_id, &slas)?;
            Ok(advisory)
        })?;
        Ok(AssignmentOutcome {
            work_order,
            advisory,
        })
    }

    /// 开工
    pub fn start_work(&self, id: &str) -> ApiResult<WorkOrder> {
        let (order, _) = self.with_order(id, |order| Ok(self.lifecycle.start(order)?))?;
        Ok(order)
    }

    /// 关闭工单
    pub fn close_work_order(&self, id: &str, completed_at: NaiveDateTime) -> ApiResult<WorkOrder> {
        let slas = self.repos.slas.get_all()?;
        let (order, _) =
            self.with_order(id, |order| Ok(self.lifecycle.close(order, completed_at, &slas)?))?;
        Ok(order)
    }

    /// 取消工单
    pub fn cancel_work_order(&self, id: &str) -> ApiResult<WorkOrder> {
        let (order, _) = self.with_order(id, |order| Ok(self.lifecycle.cancel(order)?))?;
        Ok(order)
    }

    /// CSV 导入, 返回导入条数
    ///
    /// 与已有工单 id 冲突时整体拒绝
    pub fn import_csv(&self, path: &Path, now: NaiveDateTime) -> ApiResult<usize> {
        let imported = WorkOrderCsvImporter::new(now).import_file(path)?;
        let count = imported.len();

        self.repos.work_orders.update(|orders| {
            let existing: HashSet<&str> = orders.iter().map(|o| o.id.as_str()).collect();
            if let Some(dup) = imported.iter().find(|o| existing.contains(o.id.as_str())) {
                return Err(ApiError::BusinessRuleViolation(format!(
                    "工单 id 已存在: {}",
                    dup.id
                )));
            }
            orders.extend(imported);
            Ok(())
        })?;

        tracing::info!(count, path = %path.display(), "工单 CSV 导入完成");
        Ok(count)
    }

    /// 读取 → 修改单个工单 → 整体写回
    fn with_order<R, F>(&self, id: &str, f: F) -> ApiResult<(WorkOrder, R)>
    where
        F: FnOnce(&mut WorkOrder) -> ApiResult<R>,
    {
        self.repos.work_orders.update(|orders| {
            let order = orders
                .iter_mut()
                .find(|o| o.id == id)
                .ok_or_else(|| ApiError::from(RepositoryError::not_found("WorkOrder", id)))?;
            let result = f(order)?;
            Ok((order.clone(), result))
        })
    }
}
