// ==========================================
// 订单编排核心 - API 层错误类型
// ==========================================
// 职责: 定义 API 层错误类型,转换仓储/引擎错误为对外口径
// 依据: Order_Core_Spec.md §5 错误分级 (Validation/NotFound/
//       TransactionAbort/StoreUnavailable)
// ==========================================

use crate::engine::bulk::BulkActionError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 调用方错误 (零变更)
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 批量操作错误
    // ==========================================
    /// 整批已回滚; 附带尝试过的 action/ids 供调用方重试
    #[error("批量操作中止并回滚: action={action}, order_ids={order_ids:?}: {details}")]
    TransactionAborted {
        action: String,
        order_ids: Vec<String>,
        details: String,
    },

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据存储不可用: {0}")]
    StoreUnavailable(String),

    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 将仓储层的技术错误映射到对外错误分级,从不静默吞掉
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::ValidationError(msg) => ApiError::InvalidInput(msg),
            RepositoryError::DatabaseConnectionError(msg) | RepositoryError::LockError(msg) => {
                ApiError::StoreUnavailable(msg)
            }
            RepositoryError::DatabaseTransactionError(msg)
            | RepositoryError::DatabaseQueryError(msg)
            | RepositoryError::UniqueConstraintViolation(msg) => ApiError::DatabaseError(msg),
            RepositoryError::ColumnDecodeError { column, message } => {
                ApiError::DatabaseError(format!("列解码失败({}): {}", column, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(e) => ApiError::Other(e),
        }
    }
}

impl From<BulkActionError> for ApiError {
    fn from(err: BulkActionError) -> Self {
        match err {
            BulkActionError::Validation(msg) => ApiError::InvalidInput(msg),
            BulkActionError::TransactionAborted {
                action,
                order_ids,
                source,
            } => ApiError::TransactionAborted {
                action,
                order_ids,
                details: source.to_string(),
            },
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
