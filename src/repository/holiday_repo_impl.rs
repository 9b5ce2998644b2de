// ==========================================
// 公共假日登记系统 - 假日/国家 Repository 实现
// ==========================================
// 职责: 实现假日记录存储与国家登记（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// 约束: (country_code, holiday_date) 唯一性由 holiday 表 UNIQUE 约束保证
// ==========================================

use crate::domain::holiday::{Country, HolidayRecord, NewHoliday};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::holiday_repo::{CountryRepository, HolidayRepository};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_HOLIDAY: &str = r#"
    SELECT h.id, h.holiday_name, h.holiday_date, h.holiday_dow, h.created_at,
           c.country_code, c.country_name
    FROM holiday h
    JOIN country c ON c.country_code = h.country_code
"#;

fn parse_date_column(idx: usize, raw: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_timestamp_column(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// 行映射（列顺序与 SELECT_HOLIDAY 一致）
fn map_holiday_row(row: &Row) -> rusqlite::Result<HolidayRecord> {
    let holiday_date: String = row.get(2)?;
    let created_at: String = row.get(4)?;

    Ok(HolidayRecord {
        id: row.get(0)?,
        holiday_name: row.get(1)?,
        holiday_date: parse_date_column(2, &holiday_date)?,
        holiday_dow: row.get(3)?,
        created_at: parse_timestamp_column(4, &created_at)?,
        country: Country {
            country_code: row.get(5)?,
            country_name: row.get(6)?,
        },
    })
}

fn find_by_id(conn: &Connection, id: i64) -> RepositoryResult<HolidayRecord> {
    let sql = format!("{} WHERE h.id = ?1", SELECT_HOLIDAY);
    conn.query_row(&sql, params![id], map_holiday_row)
        .optional()?
        .ok_or_else(|| RepositoryError::NotFound {
            entity: "holiday".to_string(),
            id: id.to_string(),
        })
}

fn lock_conn(conn: &Arc<Mutex<Connection>>) -> RepositoryResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|e| RepositoryError::LockError(e.to_string()))
}

// ==========================================
// HolidayRepositoryImpl - 假日记录仓储
// ==========================================
pub struct HolidayRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl HolidayRepositoryImpl {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        lock_conn(&self.conn)
    }

    fn query_list(
        &self,
        where_clause: &str,
        args: &[&dyn rusqlite::ToSql],
    ) -> RepositoryResult<Vec<HolidayRecord>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "{} {} ORDER BY h.holiday_date ASC, c.country_code ASC",
            SELECT_HOLIDAY, where_clause
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(args, map_holiday_row)?;

        let mut holidays = Vec::new();
        for row in rows {
            holidays.push(row?);
        }
        Ok(holidays)
    }
}

impl HolidayRepository for HolidayRepositoryImpl {
    fn find_record(
        &self,
        country_code: &str,
        holiday_date: NaiveDate,
    ) -> RepositoryResult<Option<HolidayRecord>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "{} WHERE h.country_code = ?1 AND h.holiday_date = ?2",
            SELECT_HOLIDAY
        );
        let record = conn
            .query_row(
                &sql,
                params![
                    country_code.to_uppercase(),
                    holiday_date.format(DATE_FORMAT).to_string()
                ],
                map_holiday_row,
            )
            .optional()?;
        Ok(record)
    }

    fn insert_record(&self, holiday: &NewHoliday) -> RepositoryResult<HolidayRecord> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO holiday (holiday_name, holiday_date, holiday_dow, country_code, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                holiday.holiday_name,
                holiday.holiday_date.format(DATE_FORMAT).to_string(),
                holiday.holiday_dow,
                holiday.country_code.to_uppercase(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        find_by_id(&conn, id)
    }

    fn list_all(&self) -> RepositoryResult<Vec<HolidayRecord>> {
        self.query_list("", &[])
    }

    fn find_by_country_code(&self, country_code: &str) -> RepositoryResult<Vec<HolidayRecord>> {
        let code = country_code.to_uppercase();
        self.query_list("WHERE h.country_code = ?1", &[&code])
    }

    fn find_by_country_code_and_name(
        &self,
        country_code: &str,
        holiday_name: &str,
    ) -> RepositoryResult<Vec<HolidayRecord>> {
        let code = country_code.to_uppercase();
        self.query_list(
            "WHERE h.country_code = ?1 AND h.holiday_name = ?2",
            &[&code, &holiday_name],
        )
    }

    fn find_one_by_country_code_and_name_ignore_case(
        &self,
        country_code: &str,
        holiday_name: &str,
    ) -> RepositoryResult<Option<HolidayRecord>> {
        let code = country_code.to_uppercase();
        let mut matches = self.query_list(
            "WHERE h.country_code = ?1 AND LOWER(h.holiday_name) = LOWER(?2)",
            &[&code, &holiday_name],
        )?;
        if matches.is_empty() {
            return Ok(None);
        }
        Ok(Some(matches.remove(0)))
    }

    fn update_record(
        &self,
        id: i64,
        holiday_name: &str,
        holiday_date: NaiveDate,
        holiday_dow: &str,
    ) -> RepositoryResult<HolidayRecord> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE holiday SET holiday_name = ?1, holiday_date = ?2, holiday_dow = ?3 WHERE id = ?4",
            params![
                holiday_name,
                holiday_date.format(DATE_FORMAT).to_string(),
                holiday_dow,
                id
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "holiday".to_string(),
                id: id.to_string(),
            });
        }

        find_by_id(&conn, id)
    }

    fn delete_by_country_code_and_date(
        &self,
        country_code: &str,
        holiday_date: NaiveDate,
    ) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let deleted = conn.execute(
            "DELETE FROM holiday WHERE country_code = ?1 AND holiday_date = ?2",
            params![
                country_code.to_uppercase(),
                holiday_date.format(DATE_FORMAT).to_string()
            ],
        )?;
        Ok(deleted)
    }
}

// ==========================================
// CountryRepositoryImpl - 国家登记仓储
// ==========================================
pub struct CountryRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl CountryRepositoryImpl {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        lock_conn(&self.conn)
    }
}

impl CountryRepository for CountryRepositoryImpl {
    fn find_country(&self, country_code: &str) -> RepositoryResult<Option<Country>> {
        let conn = self.get_conn()?;
        let country = conn
            .query_row(
                "SELECT country_code, country_name FROM country WHERE country_code = ?1",
                params![country_code.to_uppercase()],
                |row| {
                    Ok(Country {
                        country_code: row.get(0)?,
                        country_name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(country)
    }

    fn create_country(&self, country_code: &str, country_name: &str) -> RepositoryResult<Country> {
        let country = Country::new(country_code, country_name);
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO country (country_code, country_name) VALUES (?1, ?2)",
            params![country.country_code, country.country_name],
        )?;
        Ok(country)
    }

    fn delete_by_country_code(&self, country_code: &str) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let code = country_code.to_uppercase();

        let tx = conn.transaction()?;
        let holiday_count: i64 = tx.query_row(
            "SELECT COUNT(*) FROM holiday WHERE country_code = ?1",
            params![code],
            |row| row.get(0),
        )?;
        // 外键 ON DELETE CASCADE 同步删除该国家的假日
        let country_count = tx.execute("DELETE FROM country WHERE country_code = ?1", params![code])?;
        tx.commit()?;

        if country_count == 0 {
            return Ok(0);
        }
        Ok(holiday_count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory_connection;

    fn setup() -> (HolidayRepositoryImpl, CountryRepositoryImpl) {
        let conn = Arc::new(Mutex::new(open_in_memory_connection().unwrap()));
        (
            HolidayRepositoryImpl::from_connection(conn.clone()),
            CountryRepositoryImpl::from_connection(conn),
        )
    }

    fn new_holiday(code: &str, date: NaiveDate, name: &str) -> NewHoliday {
        NewHoliday {
            country_code: code.to_string(),
            holiday_name: name.to_string(),
            holiday_date: date,
            holiday_dow: crate::domain::holiday::day_of_week_name(date),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_insert_and_find_record() {
        let (holidays, countries) = setup();
        countries.create_country("USA", "United States").unwrap();

        let inserted = holidays
            .insert_record(&new_holiday("USA", date(2026, 12, 25), "Christmas"))
            .unwrap();
        assert!(inserted.id > 0);
        assert_eq!(inserted.holiday_dow, "FRIDAY");
        assert_eq!(inserted.country.country_name, "United States");

        let found = holidays.find_record("usa", date(2026, 12, 25)).unwrap();
        assert_eq!(found, Some(inserted));

        assert!(holidays
            .find_record("USA", date(2026, 12, 24))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_insert_duplicate_key_is_conflict() {
        let (holidays, countries) = setup();
        countries.create_country("USA", "United States").unwrap();

        holidays
            .insert_record(&new_holiday("USA", date(2026, 1, 1), "New Year"))
            .unwrap();
        let err = holidays
            .insert_record(&new_holiday("USA", date(2026, 1, 1), "Another"))
            .unwrap_err();

        assert!(err.is_conflict(), "unexpected error: {}", err);
    }

    #[test]
    fn test_insert_unknown_country_is_foreign_key_violation() {
        let (holidays, _countries) = setup();
        let err = holidays
            .insert_record(&new_holiday("FRA", date(2026, 7, 14), "Bastille Day"))
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)));
    }

    #[test]
    fn test_create_country_twice_is_conflict() {
        let (_holidays, countries) = setup();
        countries.create_country("deu", "Germany").unwrap();

        let found = countries.find_country("DEU").unwrap().unwrap();
        assert_eq!(found.country_code, "DEU");

        let err = countries.create_country("DEU", "Deutschland").unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_search_by_code_and_name() {
        let (holidays, countries) = setup();
        countries.create_country("USA", "United States").unwrap();
        holidays
            .insert_record(&new_holiday("USA", date(2026, 9, 7), "Labor Day"))
            .unwrap();
        holidays
            .insert_record(&new_holiday("USA", date(2026, 12, 25), "Christmas"))
            .unwrap();

        assert_eq!(holidays.find_by_country_code("usa").unwrap().len(), 2);
        assert_eq!(
            holidays
                .find_by_country_code_and_name("USA", "Labor Day")
                .unwrap()
                .len(),
            1
        );
        assert!(holidays
            .find_by_country_code_and_name("USA", "labor day")
            .unwrap()
            .is_empty());
        assert!(holidays
            .find_one_by_country_code_and_name_ignore_case("USA", "labor day")
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_update_record() {
        let (holidays, countries) = setup();
        countries.create_country("USA", "United States").unwrap();
        let inserted = holidays
            .insert_record(&new_holiday("USA", date(2026, 1, 1), "New Year"))
            .unwrap();

        let updated = holidays
            .update_record(inserted.id, "New Year's Day", date(2026, 1, 2), "FRIDAY")
            .unwrap();
        assert_eq!(updated.holiday_name, "New Year's Day");
        assert_eq!(updated.holiday_date, date(2026, 1, 2));

        let err = holidays
            .update_record(9999, "X", date(2026, 1, 2), "FRIDAY")
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[test]
    fn test_delete_country_cascades_holidays() {
        let (holidays, countries) = setup();
        countries.create_country("USA", "United States").unwrap();
        countries.create_country("CAN", "Canada").unwrap();
        holidays
            .insert_record(&new_holiday("USA", date(2026, 1, 1), "New Year"))
            .unwrap();
        holidays
            .insert_record(&new_holiday("USA", date(2026, 7, 4), "Independence Day"))
            .unwrap();
        holidays
            .insert_record(&new_holiday("CAN", date(2026, 7, 1), "Canada Day"))
            .unwrap();

        assert_eq!(countries.delete_by_country_code("usa").unwrap(), 2);
        assert!(countries.find_country("USA").unwrap().is_none());
        assert_eq!(holidays.list_all().unwrap().len(), 1);
        assert_eq!(countries.delete_by_country_code("USA").unwrap(), 0);
    }

    #[test]
    fn test_delete_by_country_code_and_date() {
        let (holidays, countries) = setup();
        countries.create_country("USA", "United States").unwrap();
        holidays
            .insert_record(&new_holiday("USA", date(2026, 1, 1), "New Year"))
            .unwrap();

        assert_eq!(
            holidays
                .delete_by_country_code_and_date("USA", date(2026, 1, 1))
                .unwrap(),
            1
        );
        assert_eq!(
            holidays
                .delete_by_country_code_and_date("USA", date(2026, 1, 1))
                .unwrap(),
            0
        );
    }
}
