// ==========================================
// 公共假日登记系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与导入结果类型
// 红线: 不含数据访问逻辑,不含导入流程逻辑
// ==========================================

pub mod holiday;
pub mod outcome;

// 重导出核心类型
pub use holiday::{
    day_of_week_name, Country, HolidayCandidate, HolidayRecord, NewHoliday, RawHolidayRow,
};
pub use outcome::{
    DocumentOutcome, IngestionOutcome, RejectionReason, RowDecision, RowRejection,
    UploadedDocument,
};
