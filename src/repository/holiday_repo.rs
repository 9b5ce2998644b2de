// ==========================================
// 公共假日登记系统 - 假日/国家 Repository Trait
// ==========================================
// 职责: 定义假日记录存储与国家登记的数据访问接口
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::domain::holiday::{Country, HolidayRecord, NewHoliday};
use crate::repository::error::RepositoryResult;
use chrono::NaiveDate;

// ==========================================
// HolidayRepository Trait
// ==========================================
// 用途: 假日记录存储
// 实现者: HolidayRepositoryImpl（使用 rusqlite）
pub trait HolidayRepository: Send + Sync {
    /// 按 (国家代码, 日期) 查询假日
    ///
    /// # 返回
    /// - Ok(Some): 已存在
    /// - Ok(None): 不存在
    fn find_record(
        &self,
        country_code: &str,
        holiday_date: NaiveDate,
    ) -> RepositoryResult<Option<HolidayRecord>>;

    /// 插入假日记录（分配主键）
    ///
    /// # 返回
    /// - Err(UniqueConstraintViolation): 同一 (国家代码, 日期) 已被并发写入
    fn insert_record(&self, holiday: &NewHoliday) -> RepositoryResult<HolidayRecord>;

    /// 查询全部假日
    fn list_all(&self) -> RepositoryResult<Vec<HolidayRecord>>;

    /// 按国家代码查询
    fn find_by_country_code(&self, country_code: &str) -> RepositoryResult<Vec<HolidayRecord>>;

    /// 按国家代码 + 假日名称查询（精确匹配）
    fn find_by_country_code_and_name(
        &self,
        country_code: &str,
        holiday_name: &str,
    ) -> RepositoryResult<Vec<HolidayRecord>>;

    /// 按国家代码 + 假日名称查询单条（名称忽略大小写）
    fn find_one_by_country_code_and_name_ignore_case(
        &self,
        country_code: &str,
        holiday_name: &str,
    ) -> RepositoryResult<Option<HolidayRecord>>;

    /// 更新假日名称/日期/星期几
    fn update_record(
        &self,
        id: i64,
        holiday_name: &str,
        holiday_date: NaiveDate,
        holiday_dow: &str,
    ) -> RepositoryResult<HolidayRecord>;

    /// 按 (国家代码, 日期) 删除
    ///
    /// # 返回
    /// - 删除的记录数
    fn delete_by_country_code_and_date(
        &self,
        country_code: &str,
        holiday_date: NaiveDate,
    ) -> RepositoryResult<usize>;
}

// ==========================================
// CountryRepository Trait
// ==========================================
// 用途: 国家登记（查找或创建）
// 实现者: CountryRepositoryImpl（使用 rusqlite）
pub trait CountryRepository: Send + Sync {
    /// 按国家代码查询
    fn find_country(&self, country_code: &str) -> RepositoryResult<Option<Country>>;

    /// 创建国家
    ///
    /// # 返回
    /// - Err(UniqueConstraintViolation): 国家代码已存在
    fn create_country(&self, country_code: &str, country_name: &str) -> RepositoryResult<Country>;

    /// 删除国家及其全部假日
    ///
    /// # 返回
    /// - 随国家一并删除的假日记录数（国家不存在时为 0）
    fn delete_by_country_code(&self, country_code: &str) -> RepositoryResult<usize>;
}
