// ==========================================
// 设施资产管理系统 - 演示数据初始化
// ==========================================
// 用法: seed_demo_data [db_path]
// 流程: 清空全部命名缓存 → 写入基础档案 → 经 API 走一遍业务流程
// ==========================================

use anyhow::{anyhow, Context};
use chrono::{Duration, Local, NaiveDateTime};
use facility_ops::app::{get_default_db_path, AppState};
use facility_ops::domain::{
    Asset, AssetCategory, Branch, DeliveryDraft, MaintenanceTaskDraft, ReplenishmentDraft, Sla,
    TankLogDraft, Vendor, WorkOrder, WorkOrderDraft,
};
use facility_ops::logging;
use facility_ops::repository::{CacheName, CacheStore, SqliteCacheStore};
use facility_ops::{
    MaintenanceType, Priority, RequestStatus, RequestType, WorkOrderStatus, WorkOrderType,
};

fn main() -> anyhow::Result<()> {
    logging::init();

    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);
    let now = Local::now().naive_local();

    reset_caches(&db_path)?;

    let state = AppState::new(db_path.clone()).map_err(|e| anyhow!(e))?;
    seed_reference_data(&state)?;
    seed_work_orders(&state, now)?;
    seed_maintenance_tasks(&state, now)?;
    seed_tanker_flow(&state, now)?;

    print_quick_counts(&state)?;
    eprintln!("Seeded {}", db_path);
    Ok(())
}

fn reset_caches(db_path: &str) -> anyhow::Result<()> {
    let store = SqliteCacheStore::new(db_path).context("无法打开缓存存储")?;
    for cache in CacheName::ALL {
        store.clear(cache)?;
    }
    Ok(())
}

fn seed_reference_data(state: &AppState) -> anyhow::Result<()> {
    let assets = &state.asset_api;

    for (id, name, region) in [
        ("BR-001", "Head Office", "Central"),
        ("BR-002", "Harbour Branch", "Coastal"),
        ("BR-003", "Airport Branch", "North"),
    ] {
        assets.upsert_branch(Branch {
            id: id.to_string(),
            name: name.to_string(),
            region: Some(region.to_string()),
        })?;
    }

    for (id, name, active) in [
        ("V-COOL", "CoolAir Services", true),
        ("V-POWER", "PowerGen Maintenance", true),
        ("V-OLD", "Legacy Facilities Ltd", false),
    ] {
        assets.upsert_vendor(Vendor {
            id: id.to_string(),
            name: name.to_string(),
            active,
        })?;
    }

    assets.replace_slas(&[
        sla("SLA-P1-COOL", "Priority 1 – Emergency Service", 1, 4, &["V-COOL"]),
        sla("SLA-P1-GEN", "Priority 1 – Emergency Service", 2, 8, &[]),
        sla("SLA-P2-GEN", "Priority 2 – Urgent", 4, 24, &["V-POWER"]),
        sla("SLA-P3-GEN", "Priority 3 – Standard", 8, 72, &[]),
    ])?;

    assets.register_asset(Asset {
        id: "AS-HVAC-01".to_string(),
        name: "Rooftop Chiller".to_string(),
        branch_id: "BR-001".to_string(),
        category: AssetCategory::Hvac {
            refrigerant_type: Some("R-410A".to_string()),
            capacity_tons: Some(40.0),
        },
    })?;
    assets.register_asset(Asset {
        id: "AS-GEN-01".to_string(),
        name: "Standby Generator".to_string(),
        branch_id: "BR-002".to_string(),
        category: AssetCategory::Generator {
            fuel_type: Some("Diesel".to_string()),
            rated_kva: Some(500.0),
        },
    })?;
    assets.register_asset(Asset {
        id: "AS-TANK-01".to_string(),
        name: "Overhead Water Tank".to_string(),
        branch_id: "BR-003".to_string(),
        category: AssetCategory::WaterTank {
            capacity_litres: Some(20_000.0),
        },
    })?;
    Ok(())
}

fn sla(id: &str, level: &str, response: u32, resolution: u32, vendors: &[&str]) -> Sla {
    Sla {
        id: id.to_string(),
        name: level.to_string(),
        priority_level: level.to_string(),
        response_time: response,
        resolution_time: resolution,
        assigned_vendor_ids: vendors.iter().map(|v| v.to_string()).collect(),
    }
}

fn seed_work_orders(state: &AppState, now: NaiveDateTime) -> anyhow::Result<()> {
    let api = &state.work_order_api;
    let today = now.date();

    // 历史工单直接写入缓存（创建日早于今天, 不经过表单校验）
    let history = vec![
        historical("WO-H001", "Quarterly chiller service", Priority::Medium, WorkOrderType::Ppm, now - Duration::days(20), 10),
        historical("WO-H002", "Generator load test", Priority::High, WorkOrderType::Ppm, now - Duration::days(15), 5),
        historical("WO-H003", "Lift door sensor fault", Priority::Critical, WorkOrderType::Reactive, now - Duration::days(3), 1),
    ];
    state.repos.work_orders.put_all(&history)?;
    api.assign_vendor("WO-H001", "V-COOL")?;
    api.start_work("WO-H001")?;
    api.close_work_order("WO-H001", now - Duration::days(12))?;

    let outcome = api.assign_vendor("WO-H003", "V-POWER")?;
    if let Some(advisory) = outcome.advisory {
        eprintln!("WO-H003: {}", advisory);
    }

    let draft = WorkOrderDraft {
        title: "AHU filter replacement".to_string(),
        asset_id: "AS-HVAC-01".to_string(),
        priority: Some(Priority::Low),
        work_order_type: Some(WorkOrderType::Ppm),
        due_date: Some(today + Duration::days(7)),
    };
    let created = api.create_work_order(draft, now)?;
    api.assign_vendor(&created.id, "V-COOL")?;

    let draft = WorkOrderDraft {
        title: "Chiller compressor trip".to_string(),
        asset_id: "AS-HVAC-01".to_string(),
        priority: Some(Priority::Critical),
        work_order_type: Some(WorkOrderType::Reactive),
        due_date: Some(today),
    };
    let created = api.create_work_order(draft, now)?;
    api.assign_vendor(&created.id, "V-COOL")?;
    api.start_work(&created.id)?;
    Ok(())
}

fn historical(
    id: &str,
    title: &str,
    priority: Priority,
    work_order_type: WorkOrderType,
    created: NaiveDateTime,
    due_in_days: i64,
) -> WorkOrder {
    WorkOrder {
        id: id.to_string(),
        title: title.to_string(),
        asset_id: "AS-HVAC-01".to_string(),
        vendor_id: None,
        sla_id: None,
        priority,
        status: WorkOrderStatus::Open,
        work_order_type,
        created_date: created,
        due_date: created.date() + Duration::days(due_in_days),
        completion_date: None,
        sla_status: None,
    }
}

fn seed_maintenance_tasks(state: &AppState, now: NaiveDateTime) -> anyhow::Result<()> {
    let api = &state.maintenance_api;
    let today = now.date();

    for (title, asset, offset, task_type) in [
        ("Monthly generator run", "AS-GEN-01", -2, MaintenanceType::Preventive),
        ("Tank cleaning", "AS-TANK-01", 5, MaintenanceType::Preventive),
        ("Replace chiller belt", "AS-HVAC-01", 9, MaintenanceType::Reactive),
    ] {
        api.create_task(
            MaintenanceTaskDraft {
                title: title.to_string(),
                asset_id: Some(asset.to_string()),
                due_date: Some(today + Duration::days(offset)),
                task_type: Some(task_type),
            },
            now,
        )?;
    }
    Ok(())
}

fn seed_tanker_flow(state: &AppState, now: NaiveDateTime) -> anyhow::Result<()> {
    let api = &state.tanker_api;
    let today = now.date();

    api.set_minimum_level("BR-001", 60.0, today - Duration::days(30))?;
    api.set_minimum_level("BR-003", 50.0, today - Duration::days(30))?;

    api.record_tank_level(
        TankLogDraft {
            branch_id: "BR-001".to_string(),
            recorded_level: Some(75.0),
        },
        now - Duration::hours(6),
    )?;
    let low = api.record_tank_level(
        TankLogDraft {
            branch_id: "BR-003".to_string(),
            recorded_level: Some(42.0),
        },
        now - Duration::hours(4),
    )?;

    let request = api.create_request(
        ReplenishmentDraft {
            branch_id: "BR-003".to_string(),
            tank_log_id: Some(low.id.clone()),
            request_type: RequestType::Regular,
            requested_volume: 8_000.0,
        },
        now - Duration::hours(3),
    )?;
    api.review_request(
        &request.id,
        RequestStatus::Approved,
        Some("Tank below minimum".to_string()),
        now - Duration::hours(2),
    )?;
    api.log_delivery(
        DeliveryDraft {
            request_id: request.id,
            volume_delivered: 8_000.0,
        },
        now - Duration::hours(1),
    )?;

    // 待审核的紧急申请
    api.create_request(
        ReplenishmentDraft {
            branch_id: "BR-002".to_string(),
            tank_log_id: None,
            request_type: RequestType::Emergency,
            requested_volume: 5_000.0,
        },
        now,
    )?;
    Ok(())
}

fn print_quick_counts(state: &AppState) -> anyhow::Result<()> {
    let repos = &state.repos;
    let counts = [
        (CacheName::Branches, repos.branches.get_all()?.len()),
        (CacheName::Vendors, repos.vendors.get_all()?.len()),
        (CacheName::Slas, repos.slas.get_all()?.len()),
        (CacheName::Assets, repos.assets.get_all()?.len()),
        (CacheName::WorkOrders, repos.work_orders.get_all()?.len()),
        (CacheName::MaintenanceTasks, repos.maintenance_tasks.get_all()?.len()),
        (CacheName::MinimumLevels, repos.minimum_levels.get_all()?.len()),
        (CacheName::TankLogs, repos.tank_logs.get_all()?.len()),
        (
            CacheName::ReplenishmentRequests,
            repos.replenishment_requests.get_all()?.len(),
        ),
        (CacheName::Deliveries, repos.deliveries.get_all()?.len()),
    ];

    eprintln!("Record counts:");
    for (cache, count) in counts {
        eprintln!("  {:<28} {}", cache.storage_key(), count);
    }
    Ok(())
}
