// ==========================================
// 公共假日登记系统 - API 请求/响应结构
// ==========================================

use crate::domain::holiday::{Country, HolidayRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 新增假日请求（四个字段均为必填）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRequest {
    pub country_code: String,
    pub country_name: String,
    pub holiday_date: Option<NaiveDate>,
    pub holiday_name: String,
}

/// 更新假日请求体
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayUpdateRequest {
    pub holiday_date: Option<NaiveDate>,
    pub holiday_name: String,
}

/// 列表/查询返回的假日视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayView {
    pub country_code: String,
    pub country_name: String,
    pub holiday_date: NaiveDate,
    pub holiday_name: String,
}

impl From<&HolidayRecord> for HolidayView {
    fn from(record: &HolidayRecord) -> Self {
        Self {
            country_code: record.country.country_code.clone(),
            country_name: record.country.country_name.clone(),
            holiday_date: record.holiday_date,
            holiday_name: record.holiday_name.clone(),
        }
    }
}

/// 新增/更新后返回的完整假日信息（含星期几）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayResponse {
    pub name: String,
    pub date: NaiveDate,
    pub dow: String,
    pub country: Country,
}

impl From<HolidayRecord> for HolidayResponse {
    fn from(record: HolidayRecord) -> Self {
        Self {
            name: record.holiday_name,
            date: record.holiday_date,
            dow: record.holiday_dow,
            country: record.country,
        }
    }
}

impl fmt::Display for HolidayResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HolidayResponse{{Holiday Date : {}, Holiday Name : {}, Day of week : {}, Country Code : {}, Country name : {}}}",
            self.date, self.name, self.dow, self.country.country_code, self.country.country_name
        )
    }
}
