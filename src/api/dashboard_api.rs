// ==========================================
// 设施资产管理系统 - 驾驶舱 API
// ==========================================
// 职责: 聚合工单指标与水车补给状态, 供驾驶舱一次性读取
// 架构: API 层 → Engine 层 (WorkOrderMetricsEngine / TankerWorkflow)
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::tanker::TankLog;
use crate::domain::types::RequestStatus;
use crate::engine::{WorkOrderMetrics, WorkOrderMetricsEngine};
use crate::repository::Repositories;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 驾驶舱汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub as_of: NaiveDate,
    pub work_orders: WorkOrderMetrics,
    /// 待审核补水申请数
    pub pending_replenishment_count: usize,
    /// 最新液位低于最低液位的分支机构
    pub branches_below_minimum: Vec<String>,
    /// 被抽中审计的送水记录数
    pub deliveries_flagged_for_audit: usize,
}

pub struct DashboardApi {
    repos: Repositories,
    metrics: WorkOrderMetricsEngine,
}

impl DashboardApi {
    pub fn new(repos: Repositories) -> Self {
        Self {
            repos,
            metrics: WorkOrderMetricsEngine::new(),
        }
    }

    /// 驾驶舱汇总
    pub fn summary(&self, today: NaiveDate) -> ApiResult<DashboardSummary> {
        let orders = self.repos.work_orders.get_all()?;
        let requests = self.repos.replenishment_requests.get_all()?;
        let logs = self.repos.tank_logs.get_all()?;
        let deliveries = self.repos.deliveries.get_all()?;

        let summary = DashboardSummary {
            as_of: today,
            work_orders: self.metrics.compute(&orders, today),
            pending_replenishment_count: requests
                .iter()
                .filter(|r| r.status == RequestStatus::PendingReview)
                .count(),
            branches_below_minimum: branches_below_minimum(&logs),
            deliveries_flagged_for_audit: deliveries.iter().filter(|d| d.flagged_for_audit).count(),
        };
        tracing::debug!(
            overdue = summary.work_orders.overdue_count,
            pending = summary.pending_replenishment_count,
            "驾驶舱汇总完成"
        );
        Ok(summary)
    }
}

/// 以每个分支机构最新一条液位记录判断, 结果按分支 id 排序
fn branches_below_minimum(logs: &[TankLog]) -> Vec<String> {
    let mut latest: HashMap<&str, &TankLog> = HashMap::new();
    for log in logs {
        let newer = latest
            .get(log.branch_id.as_str())
            .map_or(true, |prev| log.recorded_at >= prev.recorded_at);
        if newer {
            latest.insert(log.branch_id.as_str(), log);
        }
    }

    let mut branches: Vec<String> = latest
        .into_iter()
        .filter(|(_, log)| log.below_minimum)
        .map(|(branch, _)| branch.to_string())
        .collect();
    branches.sort();
    branches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(branch: &str, hour: u32, below: bool) -> TankLog {
        TankLog {
            id: format!("{}-{}", branch, hour),
            branch_id: branch.to_string(),
            recorded_level: if below { 40.0 } else { 80.0 },
            recorded_at: NaiveDate::from_ymd_opt(2026, 3, 15)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            minimum_level_at_log: Some(60.0),
            below_minimum: below,
        }
    }

    #[test]
    fn test_latest_log_decides_branch_state() {
        let logs = vec![
            log("B2", 8, true),
            log("B1", 8, true),
            log("B1", 12, false),
            log("B3", 9, false),
            log("B3", 14, true),
        ];
        assert_eq!(branches_below_minimum(&logs), vec!["B2", "B3"]);
    }

    #[test]
    fn test_no_logs() {
        assert!(branches_below_minimum(&[]).is_empty());
    }
}
