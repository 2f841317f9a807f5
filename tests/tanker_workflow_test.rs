// ==========================================
// 水车补给流程集成测试
// ==========================================
// 测试范围:
// 1. 最低液位设置与液位记录
// 2. 补水申请资格, Emergency 审计标记
// 3. 审核状态机与整改重提
// 4. 送水登记: 只接受已审核通过的申请, 审计抽样
// ==========================================


use facility_ops::api::ApiError;
use facility_ops::domain::{DeliveryDraft, ReplenishmentDraft, TankLogDraft};
use facility_ops::engine::{FixedAuditSampler, RandomAuditSampler, TankerPolicy};
use facility_ops::{RequestStatus, RequestType};
use test_helpers::*;

fn env_with(sampler_flag: bool) -> ApiTestEnv {
    let env = ApiTestEnv::new(Box::new(FixedAuditSampler(sampler_flag))).expect("无法创建测试环境");
    env.seed_reference_data().expect("无法写入基础档案");
    env.tanker_api
        .set_minimum_level("BR-1", 60.0, date(2026, 1, 1))
        .expect("设置最低液位失败");
    env
}

fn log_level(env: &ApiTestEnv, branch: &str, level: f64) -> String {
    env.tanker_api
        .record_tank_level(
            TankLogDraft {
                branch_id: branch.to_string(),
                recorded_level: Some(level),
            },
            dt(2026, 3, 15, 8),
        )
        .expect("记录液位失败")
        .id
}

fn regular(branch: &str, log_id: Option<String>) -> ReplenishmentDraft {
    ReplenishmentDraft {
        branch_id: branch.to_string(),
        tank_log_id: log_id,
        request_type: RequestType::Regular,
        requested_volume: 5000.0,
    }
}

// ==========================================
// 液位记录
// ==========================================

#[test]
fn test_液位低于最低液位() {
    let env = env_with(false);
    let log_id = log_level(&env, "BR-1", 45.0);
    let logs = env.tanker_api.list_tank_logs(Some("BR-1")).unwrap();
    let log = logs.iter().find(|l| l.id == log_id).unwrap();
    assert!(log.below_minimum);
    assert_eq!(log.minimum_level_at_log, Some(60.0));

    let log_id = log_level(&env, "BR-1", 75.0);
    let logs = env.tanker_api.list_tank_logs(Some("BR-1")).unwrap();
    assert!(!logs.iter().find(|l| l.id == log_id).unwrap().below_minimum);
}

#[test]
fn test_无最低液位时不判定低液位() {
    let env = env_with(false);
    let log_id = log_level(&env, "BR-2", 1.0);
    let logs = env.tanker_api.list_tank_logs(Some("BR-2")).unwrap();
    let log = logs.iter().find(|l| l.id == log_id).unwrap();
    assert!(!log.below_minimum);
    assert_eq!(log.minimum_level_at_log, None);
}

#[test]
fn test_新最低液位取代旧记录() {
    let env = env_with(false);
    env.tanker_api
        .set_minimum_level("BR-1", 30.0, date(2026, 3, 1))
        .unwrap();
    let active = env.tanker_api.get_active_minimum("BR-1").unwrap().unwrap();
    assert_eq!(active.minimum_level, 30.0);

    let log_id = log_level(&env, "BR-1", 45.0);
    let logs = env.tanker_api.list_tank_logs(None).unwrap();
    assert!(!logs.iter().find(|l| l.id == log_id).unwrap().below_minimum);
}

#[test]
fn test_液位表单校验() {
    let env = env_with(false);
    let result = env.tanker_api.record_tank_level(
        TankLogDraft {
            branch_id: "BR-1".to_string(),
            recorded_level: None,
        },
        dt(2026, 3, 15, 8),
    );
    assert!(matches!(result, Err(ApiError::FormValidationError { .. })));

    let result = env.tanker_api.record_tank_level(
        TankLogDraft {
            branch_id: "BR-404".to_string(),
            recorded_level: Some(10.0),
        },
        dt(2026, 3, 15, 8),
    );
    assert!(matches!(result, Err(ApiError::NotFound(_))));
    assert!(env.tanker_api.list_tank_logs(None).unwrap().is_empty());
}

// ==========================================
// 补水申请
// ==========================================

#[test]
fn test_regular_申请需要低液位记录() {
    let env = env_with(false);
    let ok_log = log_level(&env, "BR-1", 75.0);
    assert!(matches!(
        env.tanker_api.create_request(regular("BR-1", Some(ok_log)), dt(2026, 3, 15, 9)),
        Err(ApiError::BusinessRuleViolation(_))
    ));
    assert!(matches!(
        env.tanker_api.create_request(regular("BR-1", None), dt(2026, 3, 15, 9)),
        Err(ApiError::BusinessRuleViolation(_))
    ));

    let low_log = log_level(&env, "BR-1", 45.0);
    let request = env
        .tanker_api
        .create_request(regular("BR-1", Some(low_log)), dt(2026, 3, 15, 9))
        .unwrap();
    assert_eq!(request.status, RequestStatus::PendingReview);
    assert!(!request.flagged_for_audit);
}

#[test]
fn test_emergency_申请自动标记审计() {
    let env = env_with(false);
    let request = env
        .tanker_api
        .create_request(
            ReplenishmentDraft {
                request_type: RequestType::Emergency,
                ..regular("BR-2", None)
            },
            dt(2026, 3, 15, 9),
        )
        .unwrap();
    assert!(request.flagged_for_audit);
    assert_eq!(request.status, RequestStatus::PendingReview);
}

#[test]
fn test_emergency_不跳过校验的配置() {
    let env = ApiTestEnv::with_policy(
        TankerPolicy {
            emergency_bypasses_minimum: false,
        },
        Box::new(FixedAuditSampler(false)),
    )
    .unwrap();
    env.seed_reference_data().unwrap();

    let result = env.tanker_api.create_request(
        ReplenishmentDraft {
            request_type: RequestType::Emergency,
            ..regular("BR-2", None)
        },
        dt(2026, 3, 15, 9),
    );
    assert!(matches!(result, Err(ApiError::BusinessRuleViolation(_))));
}

// ==========================================
// 审核与送水
// ==========================================

#[test]
fn test_审核状态机() {
    let env = env_with(false);
    let low_log = log_level(&env, "BR-1", 45.0);
    let request = env
        .tanker_api
        .create_request(regular("BR-1", Some(low_log)), dt(2026, 3, 15, 9))
        .unwrap();

    let remediated = env
        .tanker_api
        .review_request(
            &request.id,
            RequestStatus::RemediationRequired,
            Some("Attach photo".to_string()),
            dt(2026, 3, 15, 10),
        )
        .unwrap();
    assert_eq!(remediated.status, RequestStatus::RemediationRequired);
    assert_eq!(remediated.review_notes.as_deref(), Some("Attach photo"));

    // 整改状态不能直接审批
    assert!(matches!(
        env.tanker_api.review_request(&request.id, RequestStatus::Approved, None, dt(2026, 3, 15, 11)),
        Err(ApiError::InvalidStateTransition { .. })
    ));

    let resubmitted = env.tanker_api.resubmit_request(&request.id).unwrap();
    assert_eq!(resubmitted.status, RequestStatus::PendingReview);

    let rejected = env
        .tanker_api
        .review_request(&request.id, RequestStatus::Rejected, None, dt(2026, 3, 15, 12))
        .unwrap();
    assert_eq!(rejected.status, RequestStatus::Rejected);

    // 终态
    assert!(matches!(
        env.tanker_api.resubmit_request(&request.id),
        Err(ApiError::InvalidStateTransition { .. })
    ));
    let pending = env
        .tanker_api
        .list_requests(Some(RequestStatus::PendingReview))
        .unwrap();
    assert!(pending.is_empty());
}

#[test]
fn test_送水只接受已批准申请() {
    let env = env_with(true);
    let low_log = log_level(&env, "BR-1", 45.0);
    let request = env
        .tanker_api
        .create_request(regular("BR-1", Some(low_log)), dt(2026, 3, 15, 9))
        .unwrap();

    let delivery = DeliveryDraft {
        request_id: request.id.clone(),
        volume_delivered: 5000.0,
    };
    assert!(matches!(
        env.tanker_api.log_delivery(delivery.clone(), dt(2026, 3, 15, 11)),
        Err(ApiError::BusinessRuleViolation(_))
    ));
    assert!(env.tanker_api.list_deliveries().unwrap().is_empty());

    env.tanker_api
        .review_request(&request.id, RequestStatus::Approved, None, dt(2026, 3, 15, 10))
        .unwrap();
    let logged = env
        .tanker_api
        .log_delivery(delivery, dt(2026, 3, 15, 11))
        .unwrap();
    assert_eq!(logged.branch_id, "BR-1");
    assert!(logged.flagged_for_audit);
    assert_eq!(env.tanker_api.list_deliveries().unwrap().len(), 1);
}

#[test]
fn test_送水引用不存在的申请() {
    let env = env_with(false);
    let result = env.tanker_api.log_delivery(
        DeliveryDraft {
            request_id: "R-404".to_string(),
            volume_delivered: 100.0,
        },
        dt(2026, 3, 15, 11),
    );
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[test]
fn test_审计抽样率约为四分之一() {
    let env = ApiTestEnv::new(Box::new(RandomAuditSampler::seeded(0.25, 7))).unwrap();
    env.seed_reference_data().unwrap();

    let request = env
        .tanker_api
        .create_request(
            ReplenishmentDraft {
                request_type: RequestType::Emergency,
                ..regular("BR-1", None)
            },
            dt(2026, 3, 15, 9),
        )
        .unwrap();
    env.tanker_api
        .review_request(&request.id, RequestStatus::Approved, None, dt(2026, 3, 15, 10))
        .unwrap();

    let mut flagged = 0;
    for _ in 0..400 {
        let d = env
            .tanker_api
            .log_delivery(
                DeliveryDraft {
                    request_id: request.id.clone(),
                    volume_delivered: 10.0,
                },
                dt(2026, 3, 15, 11),
            )
            .unwrap();
        if d.flagged_for_audit {
            flagged += 1;
        }
    }
    // 400 次抽样, 期望 100, 容忍约 ±4.6σ
    assert!((60..=140).contains(&flagged), "flagged = {}", flagged);
}
