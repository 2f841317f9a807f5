// ==========================================
// 设施资产管理系统 - 表单校验器
// ==========================================
// 职责: 新建记录前的必填字段/取值校验
// 约定: 校验失败返回全部违规字段, 调用方据此中止写入
// ==========================================

use crate::api::error::{ApiError, ApiResult, FieldViolation};
use crate::domain::asset::Asset;
use crate::domain::maintenance::MaintenanceTaskDraft;
use crate::domain::tanker::TankLogDraft;
use crate::domain::work_order::WorkOrderDraft;
use chrono::NaiveDate;

fn finish(violations: Vec<FieldViolation>) -> ApiResult<()> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ApiError::form(violations))
    }
}

fn require_text(violations: &mut Vec<FieldViolation>, field: &str, value: &str) {
    if value.trim().is_empty() {
        violations.push(FieldViolation::new(field, "不能为空"));
    }
}

/// 新建工单校验
///
/// - title / assetId / priority / workOrderType / dueDate 必填
/// - dueDate 不得早于创建日
pub fn validate_work_order_draft(draft: &WorkOrderDraft, today: NaiveDate) -> ApiResult<()> {
    let mut violations = Vec::new();
    require_text(&mut violations, "title", &draft.title);
    require_text(&mut violations, "assetId", &draft.asset_id);
    if draft.priority.is_none() {
        violations.push(FieldViolation::new("priority", "必须选择优先级"));
    }
    if draft.work_order_type.is_none() {
        violations.push(FieldViolation::new("workOrderType", "必须选择工单类型"));
    }
    match draft.due_date {
        None => violations.push(FieldViolation::new("dueDate", "不能为空")),
        Some(due) if due < today => violations.push(FieldViolation::new(
            "dueDate",
            format!("不能早于创建日 {}", today),
        )),
        Some(_) => {}
    }
    finish(violations)
}

/// 新建维护任务校验
pub fn validate_maintenance_task_draft(draft: &MaintenanceTaskDraft) -> ApiResult<()> {
    let mut violations = Vec::new();
    require_text(&mut violations, "title", &draft.title);
    if draft.due_date.is_none() {
        violations.push(FieldViolation::new("dueDate", "不能为空"));
    }
    if draft.task_type.is_none() {
        violations.push(FieldViolation::new("type", "必须选择任务类型"));
    }
    finish(violations)
}

/// 液位记录校验
pub fn validate_tank_log_draft(draft: &TankLogDraft) -> ApiResult<()> {
    let mut violations = Vec::new();
    require_text(&mut violations, "branchId", &draft.branch_id);
    if draft.recorded_level.is_none() {
        violations.push(FieldViolation::new("recordedLevel", "不能为空"));
    }
    finish(violations)
}

/// 资产登记校验: 通用字段 + 类别专属字段
pub fn validate_asset(asset: &Asset) -> ApiResult<()> {
    let mut violations = Vec::new();
    require_text(&mut violations, "id", &asset.id);
    require_text(&mut violations, "name", &asset.name);
    require_text(&mut violations, "branchId", &asset.branch_id);
    for field in asset.category.missing_fields() {
        violations.push(FieldViolation::new(
            field,
            format!("{} 类资产必填", asset.category.label()),
        ));
    }
    finish(violations)
}
