// ==========================================
// 公共假日登记系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 文档级错误只终止当前文档；行级问题不走此类型（见 RejectionReason）
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文档相关错误 =====
    #[error("Invalid CSV headers and Missing columns : [{}]", missing.join(", "))]
    MalformedDocument { missing: Vec<String> },

    #[error("Uploaded file is empty.")]
    EmptyDocument,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file format: {0} (only .csv is accepted)")]
    UnsupportedFormat(String),

    #[error("File read failed: {0}")]
    FileReadError(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    // ===== 配置错误 =====
    #[error("Config read failed (key: {key}): {message}")]
    ConfigReadError { key: String, message: String },

    #[error("Invalid config value (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    // ===== 执行错误 =====
    #[error("Import task failed: {0}")]
    TaskJoinError(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 是否为表头缺失导致的整文档拒绝
    pub fn is_malformed_document(&self) -> bool {
        matches!(self, ImportError::MalformedDocument { .. })
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for ImportError {
    fn from(err: rusqlite::Error) -> Self {
        ImportError::Repository(RepositoryError::from(err))
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_document_message_lists_missing_columns() {
        let err = ImportError::MalformedDocument {
            missing: vec!["country_code".to_string(), "holiday_name".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Invalid CSV headers and Missing columns : [country_code, holiday_name]"
        );
        assert!(err.is_malformed_document());
    }

    #[test]
    fn test_unique_failure_maps_to_repository_conflict() {
        let err = ImportError::from(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(19),
            Some("UNIQUE constraint failed: holiday.country_code".to_string()),
        ));
        assert!(matches!(
            err,
            ImportError::Repository(RepositoryError::UniqueConstraintViolation(_))
        ));
    }
}
