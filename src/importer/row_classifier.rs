// ==========================================
// 公共假日登记系统 - 行分类器实现
// ==========================================
// 职责: 必填 → 日期格式 → 当年 → ISO3 顺序校验
// 红线: 只做字段校验，重复检查在写入阶段完成
// ==========================================

use crate::domain::holiday::{HolidayCandidate, RawHolidayRow};
use crate::domain::outcome::{RejectionReason, RowDecision, RowRejection};
use crate::importer::holiday_importer_trait::RowClassifier as RowClassifierTrait;
use crate::importer::validators::{is_current_year, parse_date, CountryCodeTable};
use std::sync::Arc;

pub struct RowClassifier {
    country_codes: Arc<CountryCodeTable>,
}

impl RowClassifier {
    pub fn new(country_codes: Arc<CountryCodeTable>) -> Self {
        Self { country_codes }
    }

    fn reject(row: &RawHolidayRow, reason: RejectionReason) -> RowDecision {
        RowDecision::Rejected(RowRejection::new(row.row_number, reason))
    }
}

impl RowClassifierTrait for RowClassifier {
    fn classify(&self, row: &RawHolidayRow, current_year: i32) -> RowDecision {
        let fields = [
            &row.country_code,
            &row.country_name,
            &row.holiday_date,
            &row.holiday_name,
        ];
        if fields.iter().any(|v| v.trim().is_empty()) {
            return Self::reject(row, RejectionReason::EmptyMandatoryField);
        }

        let holiday_date = match parse_date(row.holiday_date.trim()) {
            Some(date) => date,
            None => return Self::reject(row, RejectionReason::InvalidDateFormat),
        };

        if !is_current_year(Some(holiday_date), current_year) {
            return Self::reject(row, RejectionReason::NotCurrentYear);
        }

        if !self.country_codes.contains(&row.country_code) {
            return Self::reject(row, RejectionReason::UnknownCountryCode);
        }

        RowDecision::Accepted(HolidayCandidate {
            country_code: row.country_code.trim().to_uppercase(),
            country_name: row.country_name.trim().to_string(),
            holiday_date,
            holiday_name: row.holiday_name.trim().to_string(),
        })
    }
}
