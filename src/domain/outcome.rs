// ==========================================
// 公共假日登记系统 - 导入结果模型
// ==========================================
// 职责: 行级拒绝原因、单文档导入结果、批量导入结果
// 约束: total_processed == inserted + rejected
// ==========================================

use crate::domain::holiday::HolidayCandidate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// RejectionReason - 行级拒绝原因
// ==========================================
// 说明: 行级拒绝永远可恢复，不会中断整个文档
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    EmptyMandatoryField,
    InvalidDateFormat,
    NotCurrentYear,
    UnknownCountryCode,
    AlreadyExists {
        country_code: String,
        holiday_date: NaiveDate,
        holiday_name: String,
    },
    // 存储异常、行读取异常等，携带底层错误信息
    Failure(String),
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::EmptyMandatoryField => write!(f, "mandatory field(s) are empty."),
            RejectionReason::InvalidDateFormat => write!(f, "Invalid Date format."),
            RejectionReason::NotCurrentYear => write!(f, "Holiday date should be current year."),
            RejectionReason::UnknownCountryCode => {
                write!(f, "Country code should be ISO3 Country code.")
            }
            RejectionReason::AlreadyExists {
                country_code,
                holiday_date,
                holiday_name,
            } => write!(
                f,
                "{}:{}:{} — Holiday already exists",
                country_code, holiday_date, holiday_name
            ),
            RejectionReason::Failure(message) => write!(f, "{}", message),
        }
    }
}

// ==========================================
// RowRejection - 行级拒绝记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRejection {
    pub row_number: usize,
    pub reason: RejectionReason,
}

impl RowRejection {
    pub fn new(row_number: usize, reason: RejectionReason) -> Self {
        Self { row_number, reason }
    }
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {} - {}", self.row_number, self.reason)
    }
}

// ==========================================
// RowDecision - 行分类结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowDecision {
    Accepted(HolidayCandidate),
    Rejected(RowRejection),
}

// ==========================================
// IngestionOutcome - 单文档导入结果
// ==========================================
// 用途: 导入管道逐行累加，返回后不再修改
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionOutcome {
    pub total_processed: usize,
    pub inserted: usize,
    pub rejected: usize,
    pub rejection_log: Vec<RowRejection>, // 按原始行号顺序
}

impl IngestionOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一条成功插入
    pub fn record_inserted(&mut self) {
        self.inserted += 1;
        self.total_processed += 1;
    }

    /// 记录一条拒绝
    pub fn record_rejection(&mut self, rejection: RowRejection) {
        self.rejected += 1;
        self.total_processed += 1;
        self.rejection_log.push(rejection);
    }

    /// 是否存在某行号的拒绝记录
    pub fn rejection_for_row(&self, row_number: usize) -> Option<&RowRejection> {
        self.rejection_log
            .iter()
            .find(|r| r.row_number == row_number)
    }
}

// ==========================================
// UploadedDocument - 上传文档
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    pub name: String,
    pub content: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

// ==========================================
// DocumentOutcome - 批量导入中单个文档的结果
// ==========================================
// 说明: 文档级失败（表头缺失等）只影响该文档，以错误信息形式保留
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutcome {
    pub document_name: String,
    pub result: Result<IngestionOutcome, String>,
}

impl DocumentOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// 文档失败时按 0 条处理计入
    pub fn total_processed(&self) -> usize {
        self.result
            .as_ref()
            .map(|o| o.total_processed)
            .unwrap_or(0)
    }
}
