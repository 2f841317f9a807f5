// ==========================================
// 设施资产管理系统 - SLA 匹配引擎
// ==========================================
// 输入: 工单优先级 + 供应商 + SLA 集合
// 输出: 命中的 SLA (可能为空) + 提示信息
// ==========================================
// 规则（顺序执行，命中即返回）:
// 1) 档位相同 且 供应商在 assigned_vendor_ids 中 → 返回, 无提示
// 2) 档位相同 → 返回, 提示 "使用通用 SLA"
// 3) 无匹配 → None, 提示 "未找到 SLA"
// 同一规则下多条命中时取集合中第一条
// ==========================================

use crate::domain::sla::Sla;
use crate::domain::types::Priority;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

// ==========================================
// SlaAdvisory - 匹配提示 (非错误)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlaAdvisory {
    /// 供应商无专属 SLA, 使用同档位通用 SLA
    GeneralSla { priority_level: String },
    /// 该档位没有任何 SLA
    NotFound { priority_level: String },
}

impl fmt::Display for SlaAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlaAdvisory::GeneralSla { priority_level } => {
                write!(f, "供应商无专属 SLA, 使用 {} 通用 SLA", priority_level)
            }
            SlaAdvisory::NotFound { priority_level } => {
                write!(f, "未找到 {} 对应的 SLA", priority_level)
            }
        }
    }
}

/// 匹配结果
#[derive(Debug, Clone, PartialEq)]
pub struct SlaMatch<'a> {
    pub sla: Option<&'a Sla>,
    pub advisory: Option<SlaAdvisory>,
}

impl<'a> SlaMatch<'a> {
    pub fn sla_id(&self) -> Option<String> {
        self.sla.map(|s| s.id.clone())
    }
}

// ==========================================
// SlaMatcher
// ==========================================
#[derive(Debug, Default)]
pub struct SlaMatcher;

impl SlaMatcher {
    pub fn new() -> Self {
        Self
    }

    /// 为工单选择适用的 SLA
    ///
    /// # 参数
    /// - priority: 工单优先级
    /// - vendor_id: 派单供应商（可为空, 为空时只能命中通用 SLA）
    /// - slas: SLA 集合
    #[instrument(skip(self, slas), fields(count = slas.len()))]
    pub fn match_sla<'a>(
        &self,
        priority: Priority,
        vendor_id: Option<&str>,
        slas: &'a [Sla],
    ) -> SlaMatch<'a> {
        let tier = priority.sla_tier();
        let label = priority.sla_label();

        if let Some(vendor_id) = vendor_id {
            let dedicated = slas
                .iter()
                .find(|s| s.tier() == Some(tier) && s.covers_vendor(vendor_id));
            if let Some(sla) = dedicated {
                return SlaMatch {
                    sla: Some(sla),
                    advisory: None,
                };
            }
        }

        if let Some(sla) = slas.iter().find(|s| s.tier() == Some(tier)) {
            tracing::warn!(priority_level = %label, sla_id = %sla.id, "使用通用 SLA");
            return SlaMatch {
                sla: Some(sla),
                advisory: Some(SlaAdvisory::GeneralSla {
                    priority_level: label,
                }),
            };
        }

        tracing::warn!(priority_level = %label, "未找到 SLA");
        SlaMatch {
            sla: None,
            advisory: Some(SlaAdvisory::NotFound {
                priority_level: label,
            }),
        }
    }
}
