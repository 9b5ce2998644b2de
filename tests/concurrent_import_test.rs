// ==========================================
// 并发导入测试
// ==========================================
// 测试目标: 验证批量导入的并发执行、结果顺序与 (国家代码, 日期) 唯一性
// ==========================================

mod test_helpers;

use holiday_registry::importer::{format_batch, HolidayImporter};
use holiday_registry::logging;
use holiday_registry::{RejectionReason, UploadedDocument};
use std::time::Instant;
use test_helpers::{count_holidays, create_test_db, create_test_importer, csv_document};

#[tokio::test]
async fn test_batch_import_multiple_documents() {
    // 初始化日志系统
    logging::init_test();

    // 创建测试数据库
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let importer = create_test_importer(&db_path);

    let documents = vec![
        UploadedDocument::new(
            "usa.csv",
            csv_document(&[
                "USA,United States,2026-01-01,New Year",
                "USA,United States,2026-12-25,Christmas",
            ]),
        ),
        UploadedDocument::new("broken.csv", "foo,bar,baz,qux\nUSA,US,2026-01-01,X\n"),
        UploadedDocument::new("empty.csv", Vec::new()),
        UploadedDocument::new(
            "can.csv",
            csv_document(&["CAN,Canada,2026-07-01,Canada Day"]),
        ),
    ];

    // 开始计时
    let start = Instant::now();
    let outcomes = importer.batch_import(documents).await;
    let elapsed = start.elapsed();

    // 结果顺序与输入一致
    let names: Vec<&str> = outcomes.iter().map(|o| o.document_name.as_str()).collect();
    assert_eq!(names, vec!["usa.csv", "broken.csv", "empty.csv", "can.csv"]);

    assert_eq!(outcomes[0].result.as_ref().unwrap().inserted, 2);
    assert_eq!(
        outcomes[1].result.as_ref().unwrap_err(),
        "Invalid CSV headers and Missing columns : [country_code, country_name, holiday_date, holiday_name]"
    );
    assert_eq!(outcomes[2].result.as_ref().unwrap_err(), "Uploaded file is empty.");
    assert_eq!(outcomes[2].total_processed(), 0);
    assert_eq!(outcomes[3].result.as_ref().unwrap().inserted, 1);
    assert_eq!(count_holidays(&db_path), 3);

    let report = format_batch(&outcomes);
    assert!(report.contains("File 1 : usa.csv"));
    assert!(report.contains("File 2 : broken.csv"));
    assert!(report.contains("File 4 : can.csv"));

    println!("批量导入 {} 个文档耗时: {:?}", outcomes.len(), elapsed);
}

#[tokio::test]
async fn test_overlapping_documents_insert_each_key_once() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let importer = create_test_importer(&db_path);

    let rows: Vec<String> = (1..=28)
        .map(|day| format!("JPN,Japan,2026-02-{:02},Day {}", day, day))
        .collect();
    let row_refs: Vec<&str> = rows.iter().map(|r| r.as_str()).collect();
    let doc = csv_document(&row_refs);

    // 同一内容的多个文档并发导入
    let documents: Vec<UploadedDocument> = (0..4)
        .map(|i| UploadedDocument::new(format!("copy_{}.csv", i), doc.clone()))
        .collect();
    let outcomes = importer.batch_import(documents).await;

    let inserted: usize = outcomes
        .iter()
        .map(|o| o.result.as_ref().unwrap().inserted)
        .sum();
    assert_eq!(inserted, 28);
    assert_eq!(count_holidays(&db_path), 28);

    for outcome in &outcomes {
        let outcome = outcome.result.as_ref().unwrap();
        assert_eq!(outcome.total_processed, 28);
        assert!(outcome
            .rejection_log
            .iter()
            .all(|r| matches!(r.reason, RejectionReason::AlreadyExists { .. })));
    }
}

#[tokio::test]
async fn test_independent_connections_race_on_same_keys() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    // 两个导入器各自持有独立连接，只能依赖存储层唯一约束
    let importer_a = create_test_importer(&db_path);
    let importer_b = create_test_importer(&db_path);

    let rows: Vec<String> = (1..=30)
        .map(|day| format!("ESP,Spain,2026-04-{:02},Dia {}", day, day))
        .collect();
    let row_refs: Vec<&str> = rows.iter().map(|r| r.as_str()).collect();
    let doc = csv_document(&row_refs);

    let (a, b) = tokio::join!(
        importer_a.import_document(UploadedDocument::new("a.csv", doc.clone())),
        importer_b.import_document(UploadedDocument::new("b.csv", doc.clone())),
    );
    let a = a.expect("import a failed");
    let b = b.expect("import b failed");

    assert_eq!(a.inserted + b.inserted, 30);
    assert_eq!(a.total_processed, 30);
    assert_eq!(b.total_processed, 30);
    assert_eq!(count_holidays(&db_path), 30);
}
