// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证配置读取、默认值与 AppState 装配
// ==========================================


use facility_ops::app::AppState;
use facility_ops::config::{config_keys, ConfigManager};
use facility_ops::domain::{ReplenishmentDraft, TankLogDraft};
use facility_ops::RequestType;
use test_helpers::{branch, create_test_db, dt};

#[test]
fn test_config_manager_默认值() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    assert_eq!(config_manager.get_audit_sample_rate().unwrap(), 0.25);
    assert!(config_manager.get_tanker_policy().unwrap().emergency_bypasses_minimum);
    assert_eq!(config_manager.get_config_snapshot().unwrap(), "{}");
}

#[test]
fn test_config_manager_读取覆写() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    config_manager
        .set_config_value(config_keys::AUDIT_SAMPLE_RATE, "0.6")
        .unwrap();
    config_manager
        .set_config_value(config_keys::EMERGENCY_BYPASSES_MINIMUM, "false")
        .unwrap();

    // 新实例读取同一数据库
    let reopened = ConfigManager::new(&db_path).unwrap();
    assert_eq!(reopened.get_audit_sample_rate().unwrap(), 0.6);
    assert!(!reopened.get_tanker_policy().unwrap().emergency_bypasses_minimum);
}

#[test]
fn test_config_manager_非法值回退() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).unwrap();

    config_manager
        .set_config_value(config_keys::AUDIT_SAMPLE_RATE, "lots")
        .unwrap();
    assert_eq!(config_manager.get_audit_sample_rate().unwrap(), 0.25);

    config_manager
        .set_config_value(config_keys::AUDIT_SAMPLE_RATE, "3")
        .unwrap();
    assert_eq!(config_manager.get_audit_sample_rate().unwrap(), 1.0);
}

#[test]
fn test_app_state_使用配置的流程参数() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    ConfigManager::new(&db_path)
        .unwrap()
        .set_config_value(config_keys::EMERGENCY_BYPASSES_MINIMUM, "false")
        .unwrap();

    let state = AppState::new(db_path).expect("无法初始化AppState");
    state.asset_api.upsert_branch(branch("BR-1")).unwrap();
    state
        .tanker_api
        .set_minimum_level("BR-1", 50.0, test_helpers::date(2026, 1, 1))
        .unwrap();
    let log = state
        .tanker_api
        .record_tank_level(
            TankLogDraft {
                branch_id: "BR-1".to_string(),
                recorded_level: Some(80.0),
            },
            dt(2026, 3, 15, 8),
        )
        .unwrap();

    // Emergency 也必须满足低液位条件
    let result = state.tanker_api.create_request(
        ReplenishmentDraft {
            branch_id: "BR-1".to_string(),
            tank_log_id: Some(log.id),
            request_type: RequestType::Emergency,
            requested_volume: 1000.0,
        },
        dt(2026, 3, 15, 9),
    );
    assert!(result.is_err());
}
