// ==========================================
// 设施资产管理系统 - SLA 领域模型
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Sla - 服务级别协议
// ==========================================
// priority_level 为自由文本, 例如 "Priority 1 – Emergency Service"
// 匹配时只看开头的档位数字
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sla {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub priority_level: String,
    pub response_time: u32,   // 响应时限 (小时)
    pub resolution_time: u32, // 解决时限 (小时)
    #[serde(default)]
    pub assigned_vendor_ids: Vec<String>,
}

impl Sla {
    /// 解析 priority_level 中的档位数字
    ///
    /// "Priority 1 – Emergency Service" → Some(1)
    /// "Priority 10" → Some(10)
    /// "Gold" → None
    pub fn tier(&self) -> Option<u8> {
        parse_priority_tier(&self.priority_level)
    }

    /// 是否覆盖指定供应商
    pub fn covers_vendor(&self, vendor_id: &str) -> bool {
        self.assigned_vendor_ids.iter().any(|v| v == vendor_id)
    }
}

/// 从 "Priority N ..." 格式中提取 N
pub fn parse_priority_tier(label: &str) -> Option<u8> {
    let rest = label.trim().strip_prefix("Priority")?;
    let digits: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_priority_tier() {
        assert_eq!(parse_priority_tier("Priority 1 – Emergency Service"), Some(1));
        assert_eq!(parse_priority_tier("Priority 4"), Some(4));
        assert_eq!(parse_priority_tier("  Priority 10 - Backlog"), Some(10));
        assert_eq!(parse_priority_tier("Priority"), None);
        assert_eq!(parse_priority_tier("Gold"), None);
    }
}
