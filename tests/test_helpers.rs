// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、导入器/API 装配、CSV 文档构造
// ==========================================
#![allow(dead_code)]

use holiday_registry::config::{config_keys, ConfigManager};
use holiday_registry::db::{init_schema, open_sqlite_connection};
use holiday_registry::importer::{CountryCodeTable, HolidayImporterImpl};
use holiday_registry::repository::{CountryRepositoryImpl, HolidayRepositoryImpl};
use holiday_registry::HolidayApi;
use rusqlite::Connection;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// 测试固定的参考年份（写入 config_kv，避免依赖系统时钟）
pub const TEST_YEAR: i32 = 2026;

/// CSV 标准表头
pub const CSV_HEADER: &str = "country_code,country_name,holiday_date,holiday_name";

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    // 固定参考年份
    let config = ConfigManager::from_connection(Arc::new(Mutex::new(conn)))?;
    config.set_config_value(config_keys::REFERENCE_YEAR, &TEST_YEAR.to_string())?;

    Ok((temp_file, db_path))
}

/// 打开共享连接（每次调用都是独立连接）
pub fn open_shared_connection(db_path: &str) -> Arc<Mutex<Connection>> {
    Arc::new(Mutex::new(
        open_sqlite_connection(db_path).expect("Failed to open db"),
    ))
}

/// 写入配置项
pub fn set_config(db_path: &str, key: &str, value: &str) {
    let config = ConfigManager::new(db_path).expect("Failed to create ConfigManager");
    config
        .set_config_value(key, value)
        .expect("Failed to set config");
}

/// 创建测试用的 HolidayImporter（使用独立连接）
pub fn create_test_importer(db_path: &str) -> HolidayImporterImpl {
    create_test_importer_with_codes(db_path, CountryCodeTable::iso3166())
}

/// 创建测试用的 HolidayImporter（自定义 ISO3 代码表）
pub fn create_test_importer_with_codes(
    db_path: &str,
    codes: CountryCodeTable,
) -> HolidayImporterImpl {
    let conn = open_shared_connection(db_path);
    let config = ConfigManager::from_connection(conn.clone()).expect("Failed to create config");

    HolidayImporterImpl::new(
        Arc::new(HolidayRepositoryImpl::from_connection(conn.clone())),
        Arc::new(CountryRepositoryImpl::from_connection(conn)),
        Arc::new(config),
        Arc::new(codes),
    )
}

/// 创建测试用的 HolidayApi
pub fn create_test_api(db_path: &str) -> HolidayApi {
    HolidayApi::from_connection(
        open_shared_connection(db_path),
        Arc::new(CountryCodeTable::iso3166()),
    )
    .expect("Failed to create HolidayApi")
}

/// 拼接带标准表头的 CSV 文档
pub fn csv_document(rows: &[&str]) -> String {
    let mut doc = String::from(CSV_HEADER);
    doc.push('\n');
    for row in rows {
        doc.push_str(row);
        doc.push('\n');
    }
    doc
}

/// 统计数据库中的假日数量
pub fn count_holidays(db_path: &str) -> i64 {
    let conn = open_sqlite_connection(db_path).expect("Failed to open db");
    conn.query_row("SELECT COUNT(*) FROM holiday", [], |row| row.get(0))
        .expect("Failed to count holidays")
}

/// 读取国家名称
pub fn country_name(db_path: &str, country_code: &str) -> Option<String> {
    let conn = open_sqlite_connection(db_path).expect("Failed to open db");
    conn.query_row(
        "SELECT country_name FROM country WHERE country_code = ?1",
        [country_code],
        |row| row.get(0),
    )
    .ok()
}
