// ==========================================
// 设施资产管理系统 - 配置管理 API
// ==========================================
// 职责: 配置查询、更新、快照
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::{config_keys, ConfigManager};

/// 配置管理API
pub struct ConfigApi {
    config_manager: Arc<ConfigManager>,
}

impl ConfigApi {
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self { config_manager }
    }

    pub fn get_config(&self, key: &str) -> ApiResult<Option<String>> {
        Ok(self.config_manager.get_config_value(key)?)
    }

    /// 更新配置
    ///
    /// 已知键按类型校验后写入; 未知键原样写入
    pub fn update_config(&self, key: &str, value: &str) -> ApiResult<()> {
        if key.trim().is_empty() {
            return Err(ApiError::InvalidInput("配置键不能为空".to_string()));
        }

        match key {
            config_keys::AUDIT_SAMPLE_RATE => {
                let rate: f64 = value.trim().parse().map_err(|_| {
                    ApiError::InvalidInput(format!("抽样率必须为数字: {}", value))
                })?;
                if !(0.0..=1.0).contains(&rate) {
                    return Err(ApiError::InvalidInput(format!(
                        "抽样率必须在 0~1 之间: {}",
                        rate
                    )));
                }
            }
            config_keys::EMERGENCY_BYPASSES_MINIMUM => {
                if value.trim().parse::<bool>().is_err() {
                    return Err(ApiError::InvalidInput(format!(
                        "必须为 true/false: {}",
                        value
                    )));
                }
            }
            _ => {}
        }

        self.config_manager.set_config_value(key, value.trim())?;
        Ok(())
    }

    /// 获取配置快照（JSON格式）
    pub fn get_config_snapshot(&self) -> ApiResult<String> {
        Ok(self.config_manager.get_config_snapshot()?)
    }
}
