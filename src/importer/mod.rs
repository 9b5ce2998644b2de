// ==========================================
// 公共假日登记系统 - 导入层
// ==========================================
// 职责: CSV 批量导入假日，生成导入报告
// 流程: 文件解析 → 行分类 → 去重写入 → 报告
// ==========================================

// 模块声明
pub mod error;
pub mod file_parser;
pub mod holiday_importer_impl;
pub mod holiday_importer_trait;
pub mod holiday_writer;
pub mod report;
pub mod row_classifier;
pub mod validators;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, HolidayRows, REQUIRED_COLUMNS};
pub use holiday_importer_impl::HolidayImporterImpl;
pub use holiday_writer::HolidayWriter;
pub use report::{format_batch, format_outcome};
pub use row_classifier::RowClassifier as RowClassifierImpl;
pub use validators::{is_current_year, parse_date, CountryCodeTable};

// 重导出 Trait 接口
pub use holiday_importer_trait::{HolidayImporter, RowClassifier};
