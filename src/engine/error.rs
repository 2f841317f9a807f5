// ==========================================
// 设施资产管理系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 业务规则/状态机错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    #[error("无效的状态转换: entity={entity}, from={from} to={to}")]
    InvalidStateTransition {
        entity: String,
        from: String,
        to: String,
    },

    #[error("补水申请未审核通过, 不能登记送水: request_id={request_id}, status={status}")]
    RequestNotApproved { request_id: String, status: String },

    #[error("不满足补水申请条件: {0}")]
    NotEligible(String),

    #[error("数值无效 (field={field}): {message}")]
    InvalidValue { field: String, message: String },
}

impl WorkflowError {
    pub fn transition(entity: &str, from: impl ToString, to: impl ToString) -> Self {
        WorkflowError::InvalidStateTransition {
            entity: entity.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
