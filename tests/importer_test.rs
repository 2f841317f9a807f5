// ==========================================
// 工单 CSV 导入器集成测试
// ==========================================
// 测试范围: 文件级错误, 真实文件解析
// ==========================================


use facility_ops::importer::{ImportError, WorkOrderCsvImporter};
use facility_ops::{Priority, WorkOrderStatus, WorkOrderType};
use std::io::Write;
use std::path::Path;
use test_helpers::*;

fn importer() -> WorkOrderCsvImporter {
    WorkOrderCsvImporter::new(dt(2026, 3, 1, 0))
}

#[test]
fn test_文件不存在() {
    let result = importer().import_file(Path::new("/nonexistent/work_orders.csv"));
    assert!(matches!(result, Err(ImportError::FileNotFound(_))));
}

#[test]
fn test_不支持的格式() {
    let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    assert!(matches!(
        importer().import_file(file.path()),
        Err(ImportError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_解析真实文件_列顺序无关() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "dueDate,id,title,assetId,priority,status,workOrderType").unwrap();
    writeln!(file, "2026-03-20,WO-1,Lift inspection,A1,Priority 1,Assigned,PPM").unwrap();
    writeln!(file, "2026-03-22,WO-2,Roof leak,A1,medium,Pending,Corrective").unwrap();
    file.flush().unwrap();

    let orders = importer().import_file(file.path()).unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, "WO-1");
    assert_eq!(orders[0].status, WorkOrderStatus::Assigned);
    assert_eq!(orders[0].due_date, date(2026, 3, 20));
    assert_eq!(orders[0].created_date, dt(2026, 3, 1, 0));
    assert_eq!(orders[1].priority, Priority::Medium);
    assert_eq!(orders[1].status, WorkOrderStatus::Open);
    assert_eq!(orders[1].work_order_type, WorkOrderType::Reactive);
}
