// ==========================================
// 公共假日登记系统 - 假日 API
// ==========================================
// 职责: 假日新增/更新/查询/删除/批量上传的业务接口（与传输层无关）
// 红线: 星期几只在写入（新增/更新）时派生
// ==========================================

use crate::api::dto::{HolidayRequest, HolidayResponse, HolidayUpdateRequest, HolidayView};
use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, ImportConfigReader};
use crate::domain::holiday::{day_of_week_name, HolidayCandidate, HolidayRecord};
use crate::domain::outcome::{RejectionReason, UploadedDocument};
use crate::importer::report::format_batch;
use crate::importer::validators::{is_current_year, parse_date, CountryCodeTable};
use crate::importer::{HolidayImporter, HolidayImporterImpl};
use crate::repository::{
    CountryRepository, CountryRepositoryImpl, HolidayRepository, HolidayRepositoryImpl,
};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::{info, instrument};

const INVALID_COUNTRY_CODE: &str = "Country code should be valid ISO3 Country code.";
const NOT_CURRENT_YEAR: &str = "Holiday date should be current year.";

// ==========================================
// HolidayApi - 假日 API
// ==========================================
pub struct HolidayApi {
    holiday_repo: Arc<dyn HolidayRepository>,
    country_repo: Arc<dyn CountryRepository>,
    config: Arc<dyn ImportConfigReader>,
    country_codes: Arc<CountryCodeTable>,
    importer: HolidayImporterImpl,
}

impl HolidayApi {
    /// 创建新的 HolidayApi 实例
    pub fn new(
        holiday_repo: Arc<dyn HolidayRepository>,
        country_repo: Arc<dyn CountryRepository>,
        config: Arc<dyn ImportConfigReader>,
        country_codes: Arc<CountryCodeTable>,
    ) -> Self {
        let importer = HolidayImporterImpl::new(
            holiday_repo.clone(),
            country_repo.clone(),
            config.clone(),
            country_codes.clone(),
        );
        Self {
            holiday_repo,
            country_repo,
            config,
            country_codes,
            importer,
        }
    }

    /// 基于共享连接装配 SQLite 仓储与配置管理器
    pub fn from_connection(
        conn: Arc<Mutex<Connection>>,
        country_codes: Arc<CountryCodeTable>,
    ) -> ApiResult<Self> {
        let config = ConfigManager::from_connection(conn.clone())?;
        Ok(Self::new(
            Arc::new(HolidayRepositoryImpl::from_connection(conn.clone())),
            Arc::new(CountryRepositoryImpl::from_connection(conn)),
            Arc::new(config),
            country_codes,
        ))
    }

    /// 底层导入器（CLI 直接按路径导入时使用）
    pub fn importer(&self) -> &HolidayImporterImpl {
        &self.importer
    }

    // ==========================================
    // 新增
    // ==========================================

    /// 新增单条假日
    ///
    /// # 返回
    /// - Err(InvalidInput): 必填缺失 / 非当年 / 非 ISO3
    /// - Err(Conflict): 同一 (国家代码, 日期) 已存在
    #[instrument(skip(self, request), fields(country_code = %request.country_code))]
    pub fn add_holiday(&self, request: &HolidayRequest) -> ApiResult<HolidayResponse> {
        let holiday_date = validate_mandatory(request)?;

        if !is_current_year(Some(holiday_date), self.current_year()?) {
            return Err(ApiError::InvalidInput(NOT_CURRENT_YEAR.to_string()));
        }
        self.require_iso3(&request.country_code)?;

        let candidate = HolidayCandidate {
            country_code: request.country_code.trim().to_uppercase(),
            country_name: request.country_name.trim().to_string(),
            holiday_date,
            holiday_name: request.holiday_name.trim().to_string(),
        };

        match self.importer.writer().insert_candidate(&candidate) {
            Ok(record) => {
                info!(holiday_id = record.id, "假日已新增");
                Ok(HolidayResponse::from(record))
            }
            Err(RejectionReason::AlreadyExists {
                country_code,
                holiday_date,
                holiday_name,
            }) => Err(ApiError::Conflict(format!(
                "Holiday already exists : {} : {} : {}",
                country_code, holiday_date, holiday_name
            ))),
            Err(reason) => Err(ApiError::DatabaseError(reason.to_string())),
        }
    }

    // ==========================================
    // 更新
    // ==========================================

    /// 按 (国家代码, 日期) 更新假日名称与日期
    #[instrument(skip(self, update))]
    pub fn update_holiday_by_code_and_date(
        &self,
        country_code: &str,
        holiday_date: NaiveDate,
        update: &HolidayUpdateRequest,
    ) -> ApiResult<HolidayResponse> {
        self.require_iso3(country_code)?;
        let current_year = self.current_year()?;
        if !is_current_year(Some(holiday_date), current_year) {
            return Err(ApiError::InvalidInput(NOT_CURRENT_YEAR.to_string()));
        }
        let (new_date, new_name) = validate_update(update, current_year)?;

        let record = self
            .holiday_repo
            .find_record(country_code, holiday_date)?
            .ok_or_else(|| {
                ApiError::NotFound(format!(
                    "No holiday found for country code '{}' on date '{}'.",
                    country_code, holiday_date
                ))
            })?;

        self.apply_update(&record, new_date, &new_name)
    }

    /// 按 (国家代码, 假日名称) 更新假日名称与日期（名称忽略大小写）
    #[instrument(skip(self, update))]
    pub fn update_holiday_by_code_and_name(
        &self,
        country_code: &str,
        holiday_name: &str,
        update: &HolidayUpdateRequest,
    ) -> ApiResult<HolidayResponse> {
        self.require_iso3(country_code)?;
        let (new_date, new_name) = validate_update(update, self.current_year()?)?;

        let record = self
            .holiday_repo
            .find_one_by_country_code_and_name_ignore_case(country_code, holiday_name.trim())?
            .ok_or_else(|| {
                ApiError::NotFound(format!(
                    "No holiday found for country code '{}' with name '{}'.",
                    country_code, holiday_name
                ))
            })?;

        self.apply_update(&record, new_date, &new_name)
    }

    fn apply_update(
        &self,
        record: &HolidayRecord,
        new_date: NaiveDate,
        new_name: &str,
    ) -> ApiResult<HolidayResponse> {
        // 日期变更后重新冻结星期几
        let updated = self.holiday_repo.update_record(
            record.id,
            new_name,
            new_date,
            &day_of_week_name(new_date),
        )?;
        info!(
            holiday_id = updated.id,
            holiday_date = %updated.holiday_date,
            "假日已更新"
        );
        Ok(HolidayResponse::from(updated))
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 查询全部假日
    pub fn list_all(&self) -> ApiResult<Vec<HolidayView>> {
        let records = self.holiday_repo.list_all()?;
        Ok(records.iter().map(HolidayView::from).collect())
    }

    /// 按国家代码查询
    pub fn search_by_country_code(&self, country_code: &str) -> ApiResult<Vec<HolidayView>> {
        self.require_iso3(country_code)?;
        let records = self.holiday_repo.find_by_country_code(country_code)?;
        Ok(records.iter().map(HolidayView::from).collect())
    }

    /// 按国家代码 + 假日名称查询（名称精确匹配）
    pub fn search_by_code_and_name(
        &self,
        country_code: &str,
        holiday_name: &str,
    ) -> ApiResult<Vec<HolidayView>> {
        self.require_iso3(country_code)?;
        let records = self
            .holiday_repo
            .find_by_country_code_and_name(country_code, holiday_name)?;
        Ok(records.iter().map(HolidayView::from).collect())
    }

    // ==========================================
    // 删除
    // ==========================================

    /// 删除国家及其全部假日
    ///
    /// # 返回
    /// - 删除的假日记录数
    #[instrument(skip(self))]
    pub fn delete_holidays_by_country_code(&self, country_code: &str) -> ApiResult<usize> {
        if country_code.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "Country code is mandatory for delete holidays.".to_string(),
            ));
        }
        self.require_iso3(country_code)?;

        let deleted = self.country_repo.delete_by_country_code(country_code)?;
        info!(deleted = deleted, "已删除国家假日");
        Ok(deleted)
    }

    /// 按 (国家代码, 日期文本) 删除假日
    #[instrument(skip(self))]
    pub fn delete_by_code_and_date(&self, country_code: &str, holiday_date: &str) -> ApiResult<usize> {
        if country_code.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "Country code is mandatory for delete holidays.".to_string(),
            ));
        }
        self.require_iso3(country_code)?;

        if holiday_date.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "Holiday Date is mandatory for delete holidays.".to_string(),
            ));
        }
        let date = parse_date(holiday_date.trim()).ok_or_else(|| {
            ApiError::InvalidInput("Holiday Date should be ISO format YYYY-MM-DD.".to_string())
        })?;

        let deleted = self
            .holiday_repo
            .delete_by_country_code_and_date(country_code, date)?;
        info!(deleted = deleted, "已删除假日");
        Ok(deleted)
    }

    // ==========================================
    // 批量上传
    // ==========================================

    /// 批量导入上传文档并渲染报告
    ///
    /// # 说明
    /// - 每个文档以 `File <n> : <name>` 开头
    /// - 单个文档的文档级错误只写入该文档的段落
    pub async fn upload_documents(&self, documents: Vec<UploadedDocument>) -> ApiResult<String> {
        if documents.is_empty() {
            return Err(ApiError::InvalidInput("Uploaded file is empty.".to_string()));
        }

        let outcomes = self.importer.batch_import(documents).await;
        Ok(format_batch(&outcomes))
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn current_year(&self) -> ApiResult<i32> {
        Ok(self.config.get_reference_year()?)
    }

    fn require_iso3(&self, country_code: &str) -> ApiResult<()> {
        if self.country_codes.contains(country_code) {
            Ok(())
        } else {
            Err(ApiError::InvalidInput(INVALID_COUNTRY_CODE.to_string()))
        }
    }
}

/// 必填校验，返回已确定的日期
fn validate_mandatory(request: &HolidayRequest) -> ApiResult<NaiveDate> {
    let mandatory = |field: &str| ApiError::InvalidInput(format!("{} is mandatory.", field));

    if request.country_code.trim().is_empty() {
        return Err(mandatory("country_code"));
    }
    if request.country_name.trim().is_empty() {
        return Err(mandatory("country_name"));
    }
    let holiday_date = request.holiday_date.ok_or_else(|| mandatory("holiday_date"))?;
    if request.holiday_name.trim().is_empty() {
        return Err(mandatory("holiday_name"));
    }
    Ok(holiday_date)
}

/// 更新请求体校验
fn validate_update(
    update: &HolidayUpdateRequest,
    current_year: i32,
) -> ApiResult<(NaiveDate, String)> {
    let new_date = match update.holiday_date {
        Some(date) if !update.holiday_name.trim().is_empty() => date,
        _ => {
            return Err(ApiError::InvalidInput(
                "Request Body Holiday Date/Name should not be empty.".to_string(),
            ))
        }
    };

    if !is_current_year(Some(new_date), current_year) {
        return Err(ApiError::InvalidInput(
            "Request Body Holiday date should be current year.".to_string(),
        ));
    }

    Ok((new_date, update.holiday_name.trim().to_string()))
}
