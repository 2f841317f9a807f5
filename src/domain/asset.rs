// ==========================================
// 设施资产管理系统 - 资产/分支机构/供应商领域模型
// ==========================================
// 资产类别为带标签联合体, 每个类别携带自身的必填字段
// 校验走 match, 不按字段名运行时查找
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Branch / Vendor - 基础档案
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

// ==========================================
// AssetCategory - 资产类别 (带动态字段)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum AssetCategory {
    #[serde(rename = "HVAC", rename_all = "camelCase")]
    Hvac {
        refrigerant_type: Option<String>,
        capacity_tons: Option<f64>,
    },
    #[serde(rename = "Generator", rename_all = "camelCase")]
    Generator {
        fuel_type: Option<String>,
        rated_kva: Option<f64>,
    },
    #[serde(rename = "Water Tank", rename_all = "camelCase")]
    WaterTank { capacity_litres: Option<f64> },
    #[serde(rename = "Elevator", rename_all = "camelCase")]
    Elevator { floors_served: Option<u32> },
    #[serde(rename = "General")]
    General,
}

impl AssetCategory {
    pub fn label(&self) -> &'static str {
        match self {
            AssetCategory::Hvac { .. } => "HVAC",
            AssetCategory::Generator { .. } => "Generator",
            AssetCategory::WaterTank { .. } => "Water Tank",
            AssetCategory::Elevator { .. } => "Elevator",
            AssetCategory::General => "General",
        }
    }

    /// 返回缺失或非法的字段名列表
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match self {
            AssetCategory::Hvac {
                refrigerant_type,
                capacity_tons,
            } => {
                if is_blank(refrigerant_type) {
                    missing.push("refrigerantType");
                }
                if !is_positive(*capacity_tons) {
                    missing.push("capacityTons");
                }
            }
            AssetCategory::Generator {
                fuel_type,
                rated_kva,
            } => {
                if is_blank(fuel_type) {
                    missing.push("fuelType");
                }
                if !is_positive(*rated_kva) {
                    missing.push("ratedKva");
                }
            }
            AssetCategory::WaterTank { capacity_litres } => {
                if !is_positive(*capacity_litres) {
                    missing.push("capacityLitres");
                }
            }
            AssetCategory::Elevator { floors_served } => {
                if floors_served.map_or(true, |f| f < 2) {
                    missing.push("floorsServed");
                }
            }
            AssetCategory::General => {}
        }
        missing
    }
}

fn is_blank(v: &Option<String>) -> bool {
    v.as_deref().map_or(true, |s| s.trim().is_empty())
}

fn is_positive(v: Option<f64>) -> bool {
    v.map_or(false, |x| x > 0.0)
}

// ==========================================
// Asset - 资产
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub branch_id: String,
    #[serde(flatten)]
    pub category: AssetCategory,
}
