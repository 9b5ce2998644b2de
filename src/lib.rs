// ==========================================
// 公共假日登记系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 按 ISO3 国家代码与日期维护公共假日，支持 CSV 批量导入
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与导入结果
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - CSV 批量导入
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    Country, DocumentOutcome, HolidayCandidate, HolidayRecord, IngestionOutcome, RejectionReason,
    RowRejection, UploadedDocument,
};

// 导入
pub use importer::{CountryCodeTable, HolidayImporter, HolidayImporterImpl};

// API
pub use api::HolidayApi;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "公共假日登记系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
