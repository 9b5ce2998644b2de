// ==========================================
// 公共假日登记系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换Repository/Import错误为用户可读的错误消息
// 约定: 校验类错误的 Display 即为返回给调用方的原文
// ==========================================

use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("{0}")]
    ImportFailed(String),

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
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => ApiError::NotFound(err.detail()),
            RepositoryError::UniqueConstraintViolation(msg) => ApiError::Conflict(msg),
            RepositoryError::LockError(msg)
            | RepositoryError::DatabaseQueryError(msg)
            | RepositoryError::ForeignKeyViolation(msg) => ApiError::DatabaseError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Repository(e) => ApiError::from(e),
            ImportError::ConfigReadError { .. } | ImportError::ConfigValueError { .. } => {
                ApiError::InternalError(err.to_string())
            }
            ImportError::Other(e) => ApiError::Other(e),
            other => ApiError::ImportFailed(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_is_conflict() {
        let err = ApiError::from(RepositoryError::UniqueConstraintViolation(
            "holiday.country_code".to_string(),
        ));
        assert!(matches!(err, ApiError::Conflict(_)));
        assert_eq!(err.to_string(), "holiday.country_code");
    }

    #[test]
    fn test_import_error_keeps_message() {
        let err = ApiError::from(ImportError::MalformedDocument {
            missing: vec!["holiday_name".to_string()],
        });
        assert_eq!(
            err.to_string(),
            "Invalid CSV headers and Missing columns : [holiday_name]"
        );

        let err = ApiError::from(ImportError::ConfigValueError {
            key: "import.reference_year".to_string(),
            value: "x".to_string(),
            message: "invalid digit".to_string(),
        });
        assert!(matches!(err, ApiError::InternalError(_)));
    }
}
