// ==========================================
// 设施资产管理系统 - 工单 CSV 导入
// ==========================================
// 表头: id,title,assetId,vendorId,priority,status,workOrderType,dueDate,createdDate
// 可选列: completionDate (status 为 Closed 时必填, 不得早于 createdDate)
// 任意一行出错即整体失败 (带行号), 不做部分导入
// ==========================================

use crate::domain::types::{Priority, WorkOrderStatus, WorkOrderType};
use crate::domain::work_order::WorkOrder;
use crate::importer::error::{ImportError, ImportResult};
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 必填列
const REQUIRED_COLUMNS: [&str; 7] = [
    "id",
    "title",
    "assetId",
    "priority",
    "status",
    "workOrderType",
    "dueDate",
];

pub struct WorkOrderCsvImporter {
    /// createdDate 缺省时使用的创建时间
    default_created: NaiveDateTime,
}

impl WorkOrderCsvImporter {
    pub fn new(default_created: NaiveDateTime) -> Self {
        Self { default_created }
    }

    /// 从文件导入
    pub fn import_file(&self, path: &Path) -> ImportResult<Vec<WorkOrder>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        if let Some(ext) = path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }
        let file = File::open(path)?;
        self.import_reader(file)
    }

    /// 从任意读取源导入
    pub fn import_reader<R: Read>(&self, reader: R) -> ImportResult<Vec<WorkOrder>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut orders = Vec::new();
        let mut seen_ids = HashSet::new();
        for (idx, result) in reader.records().enumerate() {
            // 行号从 2 开始（第 1 行为表头）
            let row = idx + 2;
            let record = result?;
            let mut fields: HashMap<&str, &str> = HashMap::new();
            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    fields.insert(header.as_str(), value.trim());
                }
            }

            // 跳过完全空白的行
            if fields.values().all(|v| v.is_empty()) {
                continue;
            }

            let order = self.map_row(row, &fields)?;
            if !seen_ids.insert(order.id.clone()) {
                return Err(ImportError::DuplicateId { row, id: order.id });
            }
            orders.push(order);
        }

        tracing::info!(count = orders.len(), "工单 CSV 解析完成");
        Ok(orders)
    }

    fn map_row(&self, row: usize, fields: &HashMap<&str, &str>) -> ImportResult<WorkOrder> {
        for col in REQUIRED_COLUMNS {
            if fields.get(col).map_or(true, |v| v.is_empty()) {
                return Err(ImportError::MissingField {
                    row,
                    field: col.to_string(),
                });
            }
        }
        let get = |col: &str| fields.get(col).copied().unwrap_or("");
        let invalid = |field: &str, value: &str| ImportError::InvalidValue {
            row,
            field: field.to_string(),
            value: value.to_string(),
        };

        let priority =
            Priority::parse(get("priority")).ok_or_else(|| invalid("priority", get("priority")))?;
        let status =
            WorkOrderStatus::parse(get("status")).ok_or_else(|| invalid("status", get("status")))?;
        let work_order_type = WorkOrderType::parse(get("workOrderType"))
            .ok_or_else(|| invalid("workOrderType", get("workOrderType")))?;

        let due_date = parse_date(row, "dueDate", get("dueDate"))?;

        // Closed 行必须带完成日期
        let completion_date = match get("completionDate") {
            "" if status == WorkOrderStatus::Closed => {
                return Err(ImportError::MissingField {
                    row,
                    field: "completionDate".to_string(),
                })
            }
            "" => None,
            raw => parse_date(row, "completionDate", raw)?.and_hms_opt(0, 0, 0),
        };

        // 历史关闭工单缺创建日期时, 以完成日期作为创建时间
        let created_date = match get("createdDate") {
            "" => match completion_date {
                Some(done) if status == WorkOrderStatus::Closed => done,
                _ => self.default_created,
            },
            raw => parse_date(row, "createdDate", raw)?
                .and_hms_opt(0, 0, 0)
                .unwrap_or(self.default_created),
        };

        if let Some(done) = completion_date {
            if done < created_date {
                return Err(invalid("completionDate", get("completionDate")));
            }
        }

        let vendor_id = Some(get("vendorId"))
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        let mut order = WorkOrder {
            id: get("id").to_string(),
            title: get("title").to_string(),
            asset_id: get("assetId").to_string(),
            vendor_id,
            sla_id: None,
            priority,
            status,
            work_order_type,
            created_date,
            due_date,
            completion_date,
            sla_status: None,
        };
        // 导入行不关联 SLA, 按到期日判定
        if status == WorkOrderStatus::Closed {
            order.sla_status = completion_date.map(|done| order.sla_outcome(done, None));
        }
        Ok(order)
    }
}

fn parse_date(row: usize, field: &str, value: &str) -> ImportResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ImportError::DateFormatError {
        row,
        field: field.to_string(),
        value: value.to_string(),
    })
}
