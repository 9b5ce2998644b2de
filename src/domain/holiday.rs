// ==========================================
// 公共假日登记系统 - 假日领域模型
// ==========================================
// 职责: 国家、假日记录、导入候选行的结构定义
// 红线: 星期几在写入时派生并冻结，读取时不得重算
// ==========================================

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

// ==========================================
// Country - 国家
// ==========================================
// 生命周期: 首次导入该国家代码的假日时懒创建
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub country_code: String, // ISO3 国家代码（大写）
    pub country_name: String, // 国家名称（首次出现时的写法）
}

impl Country {
    pub fn new(country_code: impl Into<String>, country_name: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into().to_uppercase(),
            country_name: country_name.into(),
        }
    }
}

// ==========================================
// HolidayRecord - 已持久化的假日记录
// ==========================================
// 约束: (country_code, holiday_date) 全局唯一
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    pub id: i64,                    // 代理主键（由存储分配）
    pub holiday_name: String,       // 假日名称
    pub holiday_date: NaiveDate,    // 假日日期
    pub holiday_dow: String,        // 星期几（写入时冻结）
    pub country: Country,           // 所属国家
    pub created_at: DateTime<Utc>,  // 创建时间
}

// ==========================================
// NewHoliday - 待插入的假日记录
// ==========================================
// 用途: 插入前的值对象，holiday_dow 在构造时即确定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHoliday {
    pub country_code: String,
    pub holiday_name: String,
    pub holiday_date: NaiveDate,
    pub holiday_dow: String,
}

impl NewHoliday {
    /// 由候选行构造，星期几在此刻派生
    pub fn from_candidate(candidate: &HolidayCandidate) -> Self {
        Self {
            country_code: candidate.country_code.clone(),
            holiday_name: candidate.holiday_name.clone(),
            holiday_date: candidate.holiday_date,
            holiday_dow: day_of_week_name(candidate.holiday_date),
        }
    }
}

// ==========================================
// HolidayCandidate - 通过字段校验的候选行
// ==========================================
// 用途: 行分类器的输出，尚未做重复检查
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCandidate {
    pub country_code: String, // 已转大写
    pub country_name: String,
    pub holiday_date: NaiveDate,
    pub holiday_name: String,
}

// ==========================================
// RawHolidayRow - 原始数据行
// ==========================================
// 用途: CSV 解析后的中间结构，字段均已 TRIM
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHolidayRow {
    pub row_number: usize, // 报告行号（表头为第 1 行）
    pub country_code: String,
    pub country_name: String,
    pub holiday_date: String,
    pub holiday_name: String,
}

impl RawHolidayRow {
    /// 四个必填字段是否全部为空
    pub fn is_blank(&self) -> bool {
        [
            &self.country_code,
            &self.country_name,
            &self.holiday_date,
            &self.holiday_name,
        ]
        .iter()
        .all(|v| v.trim().is_empty())
    }
}

/// 日期对应的星期名称（大写英文，如 THURSDAY）
pub fn day_of_week_name(date: NaiveDate) -> String {
    let name = match date.weekday() {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of_week_name() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        assert_eq!(day_of_week_name(date), "THURSDAY");

        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(day_of_week_name(date), "THURSDAY");

        let date = NaiveDate::from_ymd_opt(2026, 1, 4).unwrap();
        assert_eq!(day_of_week_name(date), "SUNDAY");
    }

    #[test]
    fn test_new_holiday_freezes_day_of_week() {
        let candidate = HolidayCandidate {
            country_code: "USA".to_string(),
            country_name: "United States".to_string(),
            holiday_date: NaiveDate::from_ymd_opt(2026, 7, 4).unwrap(),
            holiday_name: "Independence Day".to_string(),
        };

        let new_holiday = NewHoliday::from_candidate(&candidate);

        assert_eq!(new_holiday.holiday_dow, "SATURDAY");
        assert_eq!(new_holiday.country_code, "USA");
    }

    #[test]
    fn test_country_code_normalized() {
        let country = Country::new("usa", "United States");
        assert_eq!(country.country_code, "USA");
    }

    #[test]
    fn test_raw_row_is_blank() {
        let row = RawHolidayRow {
            row_number: 2,
            country_code: " ".to_string(),
            ..Default::default()
        };
        assert!(row.is_blank());

        let row = RawHolidayRow {
            row_number: 2,
            holiday_name: "X".to_string(),
            ..Default::default()
        };
        assert!(!row.is_blank());
    }
}
