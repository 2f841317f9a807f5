// ==========================================
// 设施资产管理系统 - 工单指标引擎
// ==========================================
// 输入: 工单集合 + today (可注入)
// 输出: 超期集合 / PPM 合规率 / 月度完成率 / 平均处理时长 / 优先级积压
// ==========================================
// 红线: 百分比四舍五入为整数; 分母为 0 时返回 0, 不报错
// ==========================================

use crate::domain::types::{Priority, SlaStatus, WorkOrderStatus, WorkOrderType};
use crate::domain::work_order::WorkOrder;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 各优先级未关闭工单数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityBreakdown {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityBreakdown {
    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::Critical => self.critical,
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

/// 工单指标汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderMetrics {
    pub total: usize,
    pub overdue_count: usize,
    pub ppm_compliance_rate: u32,
    pub monthly_completion_rate: u32,
    pub avg_resolution_hours: f64,
    pub priority_breakdown: PriorityBreakdown,
}

/// 百分比 (四舍五入), 分母为 0 返回 0
pub fn percentage(numerator: usize, denominator: usize) -> u32 {
    if denominator == 0 {
        return 0;
    }
    (numerator as f64 * 100.0 / denominator as f64).round() as u32
}

// ==========================================
// WorkOrderMetricsEngine
// ==========================================
#[derive(Debug, Default)]
pub struct WorkOrderMetricsEngine;

impl WorkOrderMetricsEngine {
    pub fn new() -> Self {
        Self
    }

    /// 超期工单: status ∉ {Closed, Cancelled} 且 due_date < today
    pub fn overdue_set<'a>(&self, orders: &'a [WorkOrder], today: NaiveDate) -> Vec<&'a WorkOrder> {
        orders.iter().filter(|o| o.is_overdue(today)).collect()
    }

    /// PPM 合规率: PPM 工单中 sla_status = Met 的占比
    pub fn ppm_compliance_rate(&self, orders: &[WorkOrder]) -> u32 {
        let ppm: Vec<&WorkOrder> = orders
            .iter()
            .filter(|o| o.work_order_type == WorkOrderType::Ppm)
            .collect();
        let met = ppm
            .iter()
            .filter(|o| o.sla_status == Some(SlaStatus::Met))
            .count();
        percentage(met, ppm.len())
    }

    /// 月度完成率: 本月创建的工单中已关闭的占比
    pub fn monthly_completion_rate(&self, orders: &[WorkOrder], today: NaiveDate) -> u32 {
        let this_month: Vec<&WorkOrder> = orders
            .iter()
            .filter(|o| {
                let created = o.created_date.date();
                created.year() == today.year() && created.month() == today.month()
            })
            .collect();
        let closed = this_month
            .iter()
            .filter(|o| o.status == WorkOrderStatus::Closed)
            .count();
        percentage(closed, this_month.len())
    }

    /// 平均处理时长 (小时): 已关闭且有完成时间的工单
    pub fn avg_resolution_hours(&self, orders: &[WorkOrder]) -> f64 {
        let hours: Vec<f64> = orders.iter().filter_map(WorkOrder::resolution_hours).collect();
        if hours.is_empty() {
            return 0.0;
        }
        hours.iter().sum::<f64>() / hours.len() as f64
    }

    /// 未关闭工单按优先级计数
    ///
    /// 只排除 Closed, Cancelled 仍计入积压
    pub fn priority_breakdown(&self, orders: &[WorkOrder]) -> PriorityBreakdown {
        let mut breakdown = PriorityBreakdown::default();
        for order in orders.iter().filter(|o| o.status != WorkOrderStatus::Closed) {
            match order.priority {
                Priority::Critical => breakdown.critical += 1,
                Priority::High => breakdown.high += 1,
                Priority::Medium => breakdown.medium += 1,
                Priority::Low => breakdown.low += 1,
            }
        }
        breakdown
    }

    /// 计算全部指标
    #[instrument(skip(self, orders), fields(count = orders.len()))]
    pub fn compute(&self, orders: &[WorkOrder], today: NaiveDate) -> WorkOrderMetrics {
        WorkOrderMetrics {
            total: orders.len(),
            overdue_count: self.overdue_set(orders, today).len(),
            ppm_compliance_rate: self.ppm_compliance_rate(orders),
            monthly_completion_rate: self.monthly_completion_rate(orders, today),
            avg_resolution_hours: self.avg_resolution_hours(orders),
            priority_breakdown: self.priority_breakdown(orders),
        }
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    /// 基准日期: 2026-03-15
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn order(id: &str, status: WorkOrderStatus, due: NaiveDate) -> WorkOrder {
        WorkOrder {
            id: id.to_string(),
            title: format!("WO {}", id),
            asset_id: "A1".to_string(),
            vendor_id: None,
            sla_id: None,
            priority: Priority::Medium,
            status,
            work_order_type: WorkOrderType::Reactive,
            created_date: at(2026, 3, 1, 8),
            due_date: due,
            completion_date: None,
            sla_status: None,
        }
    }

    #[test]
    fn test_overdue_excludes_terminal_statuses() {
        let past = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let orders = vec![
            order("1", WorkOrderStatus::Open, past),
            order("2", WorkOrderStatus::Closed, past),
            order("3", WorkOrderStatus::Cancelled, past),
            order("4", WorkOrderStatus::InProgress, past),
        ];
        let overdue = WorkOrderMetricsEngine::new().overdue_set(&orders, today());
        let ids: Vec<&str> = overdue.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_due_today_is_not_overdue() {
        let orders = vec![
            order("1", WorkOrderStatus::Open, today()),
            order("2", WorkOrderStatus::Open, today().pred_opt().unwrap()),
        ];
        let overdue = WorkOrderMetricsEngine::new().overdue_set(&orders, today());
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, "2");
    }

    #[test]
    fn test_ppm_compliance_zero_when_no_ppm() {
        let engine = WorkOrderMetricsEngine::new();
        assert_eq!(engine.ppm_compliance_rate(&[]), 0);

        let reactive = vec![order("1", WorkOrderStatus::Closed, today())];
        assert_eq!(engine.ppm_compliance_rate(&reactive), 0);
    }

    #[test]
    fn test_ppm_compliance_rounds() {
        let mut orders = Vec::new();
        for (i, met) in [true, true, false].iter().enumerate() {
            let mut o = order(&i.to_string(), WorkOrderStatus::Closed, today());
            o.work_order_type = WorkOrderType::Ppm;
            o.sla_status = Some(if *met { SlaStatus::Met } else { SlaStatus::Breached });
            orders.push(o);
        }
        // 2/3 = 66.67% → 67
        assert_eq!(WorkOrderMetricsEngine::new().ppm_compliance_rate(&orders), 67);
    }

    #[test]
    fn test_monthly_completion_rate_only_current_month() {
        let mut last_month = order("old", WorkOrderStatus::Closed, today());
        last_month.created_date = at(2026, 2, 27, 9);
        let mut last_year = order("older", WorkOrderStatus::Open, today());
        last_year.created_date = at(2025, 3, 10, 9);
        let orders = vec![
            order("1", WorkOrderStatus::Closed, today()),
            order("2", WorkOrderStatus::Open, today()),
            order("3", WorkOrderStatus::Open, today()),
            last_month,
            last_year,
        ];
        // 1/3 → 33
        assert_eq!(
            WorkOrderMetricsEngine::new().monthly_completion_rate(&orders, today()),
            33
        );
        assert_eq!(WorkOrderMetricsEngine::new().monthly_completion_rate(&[], today()), 0);
    }

    #[test]
    fn test_avg_resolution_hours() {
        let mut a = order("a", WorkOrderStatus::Closed, today());
        a.completion_date = Some(at(2026, 3, 1, 18)); // 10h
        let mut b = order("b", WorkOrderStatus::Closed, today());
        b.completion_date = Some(at(2026, 3, 2, 12)); // 28h
        let c = order("c", WorkOrderStatus::Closed, today()); // 无完成时间
        let mut d = order("d", WorkOrderStatus::Cancelled, today());
        d.completion_date = Some(at(2026, 3, 9, 8)); // 非关闭不计

        let engine = WorkOrderMetricsEngine::new();
        assert_eq!(engine.avg_resolution_hours(&[a, b, c, d]), 19.0);
        assert_eq!(engine.avg_resolution_hours(&[]), 0.0);
    }

    #[test]
    fn test_priority_breakdown_excludes_closed() {
        let mut crit = order("1", WorkOrderStatus::Open, today());
        crit.priority = Priority::Critical;
        let mut crit_closed = order("2", WorkOrderStatus::Closed, today());
        crit_closed.priority = Priority::Critical;
        let mut low = order("3", WorkOrderStatus::Cancelled, today());
        low.priority = Priority::Low;

        let b = WorkOrderMetricsEngine::new().priority_breakdown(&[crit, crit_closed, low]);
        assert_eq!(b.get(Priority::Critical), 1);
        assert_eq!(b.get(Priority::Low), 1);
        assert_eq!(b.get(Priority::High), 0);
        assert_eq!(b.total(), 2);
    }

    #[test]
    fn test_compute_on_empty_collection() {
        let m = WorkOrderMetricsEngine::new().compute(&[], today());
        assert_eq!(m.total, 0);
        assert_eq!(m.overdue_count, 0);
        assert_eq!(m.ppm_compliance_rate, 0);
        assert_eq!(m.monthly_completion_rate, 0);
        assert_eq!(m.avg_resolution_hours, 0.0);
        assert_eq!(m.priority_breakdown.total(), 0);
    }
}
