// ==========================================
// 设施资产管理系统 - 水车补给领域模型
// ==========================================
// 流程: 液位记录(低于最低液位) → 补水申请(待审核)
//       → 审核通过 → 登记送水 (25% 抽样审计)
// 红线: Delivery 只能引用已审核通过的申请
// ==========================================

use crate::domain::types::{RequestStatus, RequestType};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// MinimumLevel - 分支机构最低液位
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimumLevel {
    pub id: String,
    pub branch_id: String,
    pub minimum_level: f64,
    pub effective_from: NaiveDate,
    pub active: bool,
}

// ==========================================
// TankLog - 液位记录
// ==========================================
// below_minimum 在创建时计算一次, 之后最低液位变更不会回溯
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TankLog {
    pub id: String,
    pub branch_id: String,
    pub recorded_level: f64,
    pub recorded_at: NaiveDateTime,
    #[serde(default)]
    pub minimum_level_at_log: Option<f64>,
    pub below_minimum: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TankLogDraft {
    pub branch_id: String,
    pub recorded_level: Option<f64>,
}

// ==========================================
// ReplenishmentRequest - 补水申请
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplenishmentRequest {
    pub id: String,
    pub branch_id: String,
    #[serde(default)]
    pub tank_log_id: Option<String>,
    pub request_type: RequestType,
    pub requested_volume: f64,
    pub status: RequestStatus,
    pub flagged_for_audit: bool, // 创建时确定, 之后不再变化
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub reviewed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub review_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplenishmentDraft {
    pub branch_id: String,
    pub tank_log_id: Option<String>,
    pub request_type: RequestType,
    pub requested_volume: f64,
}

// ==========================================
// Delivery - 送水记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: String,
    pub request_id: String,
    pub branch_id: String,
    pub volume_delivered: f64,
    pub delivered_at: NaiveDateTime,
    pub flagged_for_audit: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDraft {
    pub request_id: String,
    pub volume_delivered: f64,
}
