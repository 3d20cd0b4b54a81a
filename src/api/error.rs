// ==========================================
// 门店排班系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,转换下层错误为用户友好的错误消息
// ==========================================

use crate::engine::orchestrator::PipelineError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
/// 所有错误信息必须包含显式原因（可解释性）
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 管线错误
    // ==========================================
    #[error("排班运行失败: {0}")]
    PipelineFailure(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("内部错误: {0}")]
    InternalError(String),
}

// 实现 From<PipelineError>
impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        ApiError::PipelineFailure(err.to_string())
    }
}

// 实现 From<RepositoryError>
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} (id={})", entity, id))
            }
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
