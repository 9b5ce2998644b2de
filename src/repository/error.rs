// ==========================================
// 公共假日登记系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 数据库错误 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    // 并发导入同一 (country_code, holiday_date) 时由此信号兜底
    #[error("唯一约束违反: {0}")]
    UniqueConstraintViolation(String),

    #[error("外键约束违反: {0}")]
    ForeignKeyViolation(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, RepositoryError::UniqueConstraintViolation(_))
    }

    /// 底层错误信息（不带分类前缀），用于写入面向调用方的报告
    pub fn detail(&self) -> String {
        match self {
            RepositoryError::NotFound { entity, id } => format!("{} {} not found", entity, id),
            RepositoryError::LockError(msg)
            | RepositoryError::DatabaseQueryError(msg)
            | RepositoryError::UniqueConstraintViolation(msg)
            | RepositoryError::ForeignKeyViolation(msg) => msg.clone(),
            RepositoryError::Other(err) => err.to_string(),
        }
    }
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_drops_category_prefix() {
        let err = RepositoryError::DatabaseQueryError("disk I/O error".to_string());
        assert_eq!(err.to_string(), "数据库查询失败: disk I/O error");
        assert_eq!(err.detail(), "disk I/O error");

        let err = RepositoryError::UniqueConstraintViolation(
            "UNIQUE constraint failed: holiday.country_code, holiday.holiday_date".to_string(),
        );
        assert!(err.is_conflict());
        assert_eq!(
            err.detail(),
            "UNIQUE constraint failed: holiday.country_code, holiday.holiday_date"
        );
    }
}
