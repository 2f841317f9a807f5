// ==========================================
// 设施资产管理系统 - 维护日历投影
// ==========================================
// 输入: 工单集合 + 维护任务集合 + 展示月份 + today
// 输出: 日 → 事件列表
// ==========================================
// 规则:
// - 只收录 due_date 落在展示月份内的事件（不跨月）
// - 状态: 未完成且 due_date < today → overdue; 已完成 → completed; 否则 scheduled
// - 已取消工单不上日历
// - 同一天内: 先工单后维护任务, 各自保持集合顺序（实现约定）
// ==========================================

use crate::domain::maintenance::{CalendarEvent, CalendarMonth, MaintenanceCalendar, MaintenanceTask};
use crate::domain::types::{EventStatus, TaskStatus, WorkOrderStatus};
use crate::domain::work_order::WorkOrder;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use tracing::instrument;

fn classify(completed: bool, due_date: NaiveDate, today: NaiveDate) -> EventStatus {
    if !completed && due_date < today {
        EventStatus::Overdue
    } else if completed {
        EventStatus::Completed
    } else {
        EventStatus::Scheduled
    }
}

#[derive(Debug, Default)]
pub struct MaintenanceCalendarProjector;

impl MaintenanceCalendarProjector {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self, orders, tasks), fields(orders = orders.len(), tasks = tasks.len()))]
    pub fn project(
        &self,
        orders: &[WorkOrder],
        tasks: &[MaintenanceTask],
        month: CalendarMonth,
        today: NaiveDate,
    ) -> MaintenanceCalendar {
        let mut days: BTreeMap<u32, Vec<CalendarEvent>> = BTreeMap::new();

        let order_events = orders
            .iter()
            .filter(|o| o.status != WorkOrderStatus::Cancelled)
            .filter(|o| month.contains(o.due_date))
            .map(|o| {
                let event = CalendarEvent {
                    source_id: o.id.clone(),
                    title: o.title.clone(),
                    event_type: o.work_order_type.into(),
                    status: classify(o.status == WorkOrderStatus::Closed, o.due_date, today),
                };
                (o.due_date.day(), event)
            });

        let task_events = tasks
            .iter()
            .filter(|t| month.contains(t.due_date))
            .map(|t| {
                let event = CalendarEvent {
                    source_id: t.id.clone(),
                    title: t.title.clone(),
                    event_type: t.task_type,
                    status: classify(t.status == TaskStatus::Completed, t.due_date, today),
                };
                (t.due_date.day(), event)
            });

        for (day, event) in order_events.chain(task_events) {
            days.entry(day).or_default().push(event);
        }

        MaintenanceCalendar { month, days }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{MaintenanceType, Priority, WorkOrderType};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn order(id: &str, due: NaiveDate, status: WorkOrderStatus) -> WorkOrder {
        WorkOrder {
            id: id.to_string(),
            title: format!("WO {}", id),
            asset_id: "A1".to_string(),
            vendor_id: None,
            sla_id: None,
            priority: Priority::Low,
            status,
            work_order_type: WorkOrderType::Ppm,
            created_date: date(3, 1).and_hms_opt(8, 0, 0).unwrap(),
            due_date: due,
            completion_date: None,
            sla_status: None,
        }
    }

    fn task(id: &str, due: NaiveDate, status: TaskStatus) -> MaintenanceTask {
        MaintenanceTask {
            id: id.to_string(),
            title: format!("Task {}", id),
            asset_id: None,
            due_date: due,
            status,
            task_type: MaintenanceType::Reactive,
            created_at: date(3, 1).and_hms_opt(8, 0, 0).unwrap(),
            completed_at: None,
        }
    }

    #[test]
    fn test_event_only_in_matching_month() {
        let orders = vec![order("1", date(3, 15), WorkOrderStatus::Open)];
        let projector = MaintenanceCalendarProjector::new();
        let march = CalendarMonth::new(2026, 3).unwrap();

        let cal = projector.project(&orders, &[], march, date(3, 1));
        assert_eq!(cal.events_on(15).len(), 1);
        assert_eq!(cal.event_count(), 1);

        let cal = projector.project(&orders, &[], march.next(), date(3, 1));
        assert_eq!(cal.event_count(), 0);

        let other_year = CalendarMonth::new(2027, 3).unwrap();
        assert_eq!(projector.project(&orders, &[], other_year, date(3, 1)).event_count(), 0);
    }

    #[test]
    fn test_status_classification() {
        let today = date(3, 10);
        let orders = vec![
            order("late", date(3, 5), WorkOrderStatus::InProgress),
            order("done", date(3, 5), WorkOrderStatus::Closed),
            order("soon", date(3, 20), WorkOrderStatus::Open),
            order("today", date(3, 10), WorkOrderStatus::Open),
        ];
        let tasks = vec![
            task("t-late", date(3, 6), TaskStatus::Scheduled),
            task("t-done", date(3, 6), TaskStatus::Completed),
        ];
        let cal = MaintenanceCalendarProjector::new().project(
            &orders,
            &tasks,
            CalendarMonth::of(today),
            today,
        );

        let status_of = |day: u32, id: &str| {
            cal.events_on(day)
                .iter()
                .find(|e| e.source_id == id)
                .map(|e| e.status)
        };
        assert_eq!(status_of(5, "late"), Some(EventStatus::Overdue));
        assert_eq!(status_of(5, "done"), Some(EventStatus::Completed));
        assert_eq!(status_of(20, "soon"), Some(EventStatus::Scheduled));
        assert_eq!(status_of(10, "today"), Some(EventStatus::Scheduled));
        assert_eq!(status_of(6, "t-late"), Some(EventStatus::Overdue));
        assert_eq!(status_of(6, "t-done"), Some(EventStatus::Completed));
    }

    #[test]
    fn test_event_types_follow_source() {
        let orders = vec![order("ppm", date(3, 2), WorkOrderStatus::Open)];
        let tasks = vec![task("t", date(3, 2), TaskStatus::Scheduled)];
        let cal = MaintenanceCalendarProjector::new().project(
            &orders,
            &tasks,
            CalendarMonth::new(2026, 3).unwrap(),
            date(3, 1),
        );
        let types: Vec<MaintenanceType> = cal.events_on(2).iter().map(|e| e.event_type).collect();
        assert_eq!(types, vec![MaintenanceType::Preventive, MaintenanceType::Reactive]);
    }

    // 同日排序为实现约定: 工单在前, 任务在后, 各自保持集合顺序
    #[test]
    fn test_same_day_ordering_convention() {
        let orders = vec![
            order("wo-b", date(3, 9), WorkOrderStatus::Open),
            order("wo-a", date(3, 9), WorkOrderStatus::Open),
        ];
        let tasks = vec![task("task-1", date(3, 9), TaskStatus::Scheduled)];
        let cal = MaintenanceCalendarProjector::new().project(
            &orders,
            &tasks,
            CalendarMonth::new(2026, 3).unwrap(),
            date(3, 1),
        );
        let ids: Vec<&str> = cal.events_on(9).iter().map(|e| e.source_id.as_str()).collect();
        assert_eq!(ids, vec!["wo-b", "wo-a", "task-1"]);
    }

    #[test]
    fn test_cancelled_orders_not_projected() {
        let orders = vec![order("x", date(3, 4), WorkOrderStatus::Cancelled)];
        let cal = MaintenanceCalendarProjector::new().project(
            &orders,
            &[],
            CalendarMonth::new(2026, 3).unwrap(),
            date(3, 10),
        );
        assert_eq!(cal.event_count(), 0);
    }
}
