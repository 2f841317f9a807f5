// ==========================================
// 设施资产管理系统 - 维护 API
// ==========================================
// 职责: 维护任务新建/完成, 月度维护日历
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::validate_maintenance_task_draft;
use crate::domain::maintenance::{
    CalendarMonth, MaintenanceCalendar, MaintenanceTask, MaintenanceTaskDraft,
};
use crate::domain::types::TaskStatus;
use crate::engine::MaintenanceCalendarProjector;
use crate::repository::{RepositoryError, Repositories};
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

pub struct MaintenanceApi {
    repos: Repositories,
    projector: MaintenanceCalendarProjector,
}

impl MaintenanceApi {
    pub fn new(repos: Repositories) -> Self {
        Self {
            repos,
            projector: MaintenanceCalendarProjector::new(),
        }
    }

    pub fn list_tasks(&self) -> ApiResult<Vec<MaintenanceTask>> {
        Ok(self.repos.maintenance_tasks.get_all()?)
    }

    /// 新建维护任务
    pub fn create_task(
        &self,
        draft: MaintenanceTaskDraft,
        now: NaiveDateTime,
    ) -> ApiResult<MaintenanceTask> {
        validate_maintenance_task_draft(&draft)?;
        let (due_date, task_type) = match (draft.due_date, draft.task_type) {
            (Some(d), Some(t)) => (d, t),
            _ => return Err(ApiError::InternalError("维护任务表单校验不完整".to_string())),
        };

        let task = MaintenanceTask {
            id: Uuid::new_v4().to_string(),
            title: draft.title.trim().to_string(),
            asset_id: draft.asset_id.filter(|a| !a.trim().is_empty()),
            due_date,
            status: TaskStatus::Scheduled,
            task_type,
            created_at: now,
            completed_at: None,
        };

        self.repos.maintenance_tasks.update(|tasks| {
            tasks.push(task.clone());
            Ok::<_, ApiError>(())
        })?;
        tracing::info!(task_id = %task.id, due_date = %task.due_date, "维护任务已创建");
        Ok(task)
    }

    /// 完成维护任务（重复完成视为无效状态转换）
    pub fn complete_task(&self, id: &str, now: NaiveDateTime) -> ApiResult<MaintenanceTask> {
        self.repos.maintenance_tasks.update(|tasks| {
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| ApiError::from(RepositoryError::not_found("MaintenanceTask", id)))?;
            if task.status == TaskStatus::Completed {
                return Err(ApiError::InvalidStateTransition {
                    from: "COMPLETED".to_string(),
                    to: "COMPLETED".to_string(),
                });
            }
            task.status = TaskStatus::Completed;
            task.completed_at = Some(now);
            Ok(task.clone())
        })
    }

    /// 月度维护日历
    pub fn get_calendar(
        &self,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> ApiResult<MaintenanceCalendar> {
        let month = CalendarMonth::new(year, month)
            .ok_or_else(|| ApiError::InvalidInput(format!("月份无效: {}-{}", year, month)))?;
        let orders = self.repos.work_orders.get_all()?;
        let tasks = self.repos.maintenance_tasks.get_all()?;
        Ok(self.projector.project(&orders, &tasks, month, today))
    }
}
