// ==========================================
// 设施资产管理系统 - 导入层
// ==========================================
// 职责: 外部数据导入 (CSV), 生成领域记录
// ==========================================

pub mod error;
pub mod work_order_csv;

pub use error::{ImportError, ImportResult};
pub use work_order_csv::WorkOrderCsvImporter;
