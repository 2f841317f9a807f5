// ==========================================
// 设施资产管理系统 - 送水审计抽样
// ==========================================
// 每条新送水记录以固定概率独立抽中审计
// 随机源可注入 (可设种子), 便于测试两条分支
// ==========================================

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 默认抽样率
pub const DEFAULT_AUDIT_SAMPLE_RATE: f64 = 0.25;

/// 抽样率限制在 [0, 1], NaN 视为 0
pub fn normalize_rate(rate: f64) -> f64 {
    if rate.is_nan() {
        0.0
    } else {
        rate.clamp(0.0, 1.0)
    }
}

/// 审计抽样接口
pub trait AuditSampler: Send {
    /// 是否抽中本条记录
    fn should_flag(&mut self) -> bool;
}

/// 概率抽样器
pub struct RandomAuditSampler {
    rng: StdRng,
    rate: f64,
}

impl RandomAuditSampler {
    /// 使用系统熵创建
    pub fn new(rate: f64) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            rate: normalize_rate(rate),
        }
    }

    /// 使用固定种子创建（结果可复现）
    pub fn seeded(rate: f64, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            rate: normalize_rate(rate),
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Default for RandomAuditSampler {
    fn default() -> Self {
        Self::new(DEFAULT_AUDIT_SAMPLE_RATE)
    }
}

impl AuditSampler for RandomAuditSampler {
    fn should_flag(&mut self) -> bool {
        self.rng.gen_bool(self.rate)
    }
}

/// 固定结果抽样器
#[derive(Debug, Clone, Copy)]
pub struct FixedAuditSampler(pub bool);

impl AuditSampler for FixedAuditSampler {
    fn should_flag(&mut self) -> bool {
        self.0
    }
}
