// ==========================================
// 公共假日登记系统 - 假日写入器（去重插入）
// ==========================================
// 职责: 存在性检查 → 国家查找或创建 → 插入（冻结星期几）
// 红线: (country_code, holiday_date) 唯一性以存储层 UNIQUE 约束为准
//       预检查只负责给出友好的拒绝原因
// ==========================================

use crate::domain::holiday::{HolidayCandidate, HolidayRecord, NewHoliday};
use crate::domain::outcome::RejectionReason;
use crate::repository::error::RepositoryError;
use crate::repository::holiday_repo::{CountryRepository, HolidayRepository};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct HolidayWriter {
    holiday_repo: Arc<dyn HolidayRepository>,
    country_repo: Arc<dyn CountryRepository>,
}

impl HolidayWriter {
    pub fn new(
        holiday_repo: Arc<dyn HolidayRepository>,
        country_repo: Arc<dyn CountryRepository>,
    ) -> Self {
        Self {
            holiday_repo,
            country_repo,
        }
    }

    /// 写入一条候选假日
    ///
    /// # 返回
    /// - Ok(HolidayRecord): 新插入的记录
    /// - Err(AlreadyExists): 同一 (国家代码, 日期) 已有记录（含并发写入的胜出者）
    /// - Err(Failure): 其它存储异常，携带底层错误信息
    pub fn insert_candidate(
        &self,
        candidate: &HolidayCandidate,
    ) -> Result<HolidayRecord, RejectionReason> {
        // 1. 存在性检查
        if let Some(existing) = self
            .holiday_repo
            .find_record(&candidate.country_code, candidate.holiday_date)
            .map_err(failure)?
        {
            return Err(already_exists(&existing));
        }

        // 2. 国家查找或创建（已存在时不覆盖名称）
        self.ensure_country(candidate).map_err(failure)?;

        // 3. 插入
        let new_holiday = NewHoliday::from_candidate(candidate);
        match self.holiday_repo.insert_record(&new_holiday) {
            Ok(record) => Ok(record),
            Err(e) if e.is_conflict() => {
                debug!(
                    country_code = %candidate.country_code,
                    holiday_date = %candidate.holiday_date,
                    "插入冲突，读取已存在记录"
                );
                match self
                    .holiday_repo
                    .find_record(&candidate.country_code, candidate.holiday_date)
                    .map_err(failure)?
                {
                    Some(existing) => Err(already_exists(&existing)),
                    None => Err(failure(e)),
                }
            }
            Err(e) => Err(failure(e)),
        }
    }

    fn ensure_country(&self, candidate: &HolidayCandidate) -> Result<(), RepositoryError> {
        if self
            .country_repo
            .find_country(&candidate.country_code)?
            .is_some()
        {
            return Ok(());
        }

        match self
            .country_repo
            .create_country(&candidate.country_code, &candidate.country_name)
        {
            Ok(_) => Ok(()),
            // 并发创建：另一方已写入，沿用其名称
            Err(e) if e.is_conflict() => {
                self.country_repo
                    .find_country(&candidate.country_code)?
                    .map(|_| ())
                    .ok_or(e)
            }
            Err(e) => Err(e),
        }
    }
}

fn already_exists(existing: &HolidayRecord) -> RejectionReason {
    RejectionReason::AlreadyExists {
        country_code: existing.country.country_code.clone(),
        holiday_date: existing.holiday_date,
        holiday_name: existing.holiday_name.clone(),
    }
}

fn failure(err: RepositoryError) -> RejectionReason {
    warn!(error = %err, "假日写入失败");
    RejectionReason::Failure(err.detail())
}
