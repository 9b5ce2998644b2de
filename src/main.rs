// ==========================================
// 公共假日登记系统 - 命令行入口
// ==========================================
// 用法:
//   holiday-registry <file.csv>...
//
// 数据库路径: HOLIDAY_REGISTRY_DB_PATH > 用户数据目录 > 当前目录
// 导入报告输出到 stdout，日志输出到 stderr
// ==========================================

use anyhow::Context;
use futures::future::join_all;
use holiday_registry::db::{get_default_db_path, init_schema, open_sqlite_connection};
use holiday_registry::importer::format_batch;
use holiday_registry::{logging, CountryCodeTable, DocumentOutcome, HolidayApi, HolidayImporter};
use std::sync::{Arc, Mutex};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    let files: Vec<String> = std::env::args().skip(1).collect();
    if files.is_empty() {
        eprintln!("usage: holiday-registry <file.csv>...");
        std::process::exit(2);
    }

    tracing::info!("==================================================");
    tracing::info!("{} v{}", holiday_registry::APP_NAME, holiday_registry::VERSION);
    tracing::info!("==================================================");

    // 获取数据库路径
    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    let conn = open_sqlite_connection(&db_path)
        .with_context(|| format!("无法打开数据库: {}", db_path))?;
    init_schema(&conn).context("数据库建表失败")?;

    // ISO3 代码表启动时构造一次
    let country_codes = Arc::new(CountryCodeTable::iso3166());
    let api = HolidayApi::from_connection(Arc::new(Mutex::new(conn)), country_codes)?;

    // 每个文件一个文档，并发导入，报告按参数顺序输出
    let importer = api.importer();
    let import_tasks = files.iter().map(|file| async move {
        let result = importer
            .import_from_csv(file)
            .await
            .map_err(|e| e.to_string());
        DocumentOutcome {
            document_name: file.clone(),
            result,
        }
    });
    let outcomes = join_all(import_tasks).await;

    print!("{}", format_batch(&outcomes));

    Ok(())
}
