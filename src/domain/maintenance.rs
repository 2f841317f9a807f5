// ==========================================
// 设施资产管理系统 - 维护任务与日历领域模型
// ==========================================
// 维护任务由用户创建, 不会被自动删除
// ==========================================

use crate::domain::types::{EventStatus, MaintenanceType, TaskStatus};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// MaintenanceTask - 临时维护任务
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub asset_id: Option<String>,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    #[serde(rename = "type")]
    pub task_type: MaintenanceType,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTaskDraft {
    pub title: String,
    pub asset_id: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub task_type: Option<MaintenanceType>,
}

// ==========================================
// CalendarMonth - 日历展示月份
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCalendarMonth")]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

/// 反序列化中间形态, 经 CalendarMonth::new 校验
#[derive(Deserialize)]
struct RawCalendarMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawCalendarMonth> for CalendarMonth {
    type Error = String;

    fn try_from(raw: RawCalendarMonth) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month)
            .ok_or_else(|| format!("无效月份: {}-{:02}", raw.year, raw.month))
    }
}

impl CalendarMonth {
    /// 创建月份, month 超出 1..=12 返回 None
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// 所在日期的月份
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// 解析 "YYYY-MM"
    pub fn parse(s: &str) -> Option<Self> {
        let (y, m) = s.trim().split_once('-')?;
        Self::new(y.parse().ok()?, m.parse().ok()?)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }
}

// ==========================================
// CalendarEvent - 日历事件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub source_id: String,
    pub title: String,
    #[serde(rename = "type", with = "event_type_label")]
    pub event_type: MaintenanceType,
    pub status: EventStatus,
}

/// 日历事件类型标签: Preventive | Reactive
mod event_type_label {
    use crate::domain::types::MaintenanceType;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(event_type: &MaintenanceType, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let label = match event_type {
            MaintenanceType::Preventive => "Preventive",
            MaintenanceType::Reactive => "Reactive",
        };
        label.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<MaintenanceType, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_ascii_uppercase().as_str() {
            "PREVENTIVE" => Ok(MaintenanceType::Preventive),
            "REACTIVE" => Ok(MaintenanceType::Reactive),
            _ => Err(serde::de::Error::unknown_variant(&s, &["Preventive", "Reactive"])),
        }
    }
}

/// 月度日历: 日 → 当日事件列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceCalendar {
    pub month: CalendarMonth,
    pub days: BTreeMap<u32, Vec<CalendarEvent>>,
}

impl MaintenanceCalendar {
    pub fn events_on(&self, day: u32) -> &[CalendarEvent] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn event_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}
