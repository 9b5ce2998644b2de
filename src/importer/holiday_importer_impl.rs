// ==========================================
// 公共假日登记系统 - 假日导入器实现
// ==========================================
// 职责: 整合导入流程，从文档到存储
// 流程: 表头校验 → 逐行读取 → 行分类 → 去重写入 → 结果累加
// 红线: 单行失败只记拒绝，不中断文档；表头缺失整文档拒绝
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::outcome::{
    DocumentOutcome, IngestionOutcome, RowDecision, RowRejection, UploadedDocument,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{CsvParser, HolidayRows};
use crate::importer::holiday_importer_trait::{HolidayImporter, RowClassifier};
use crate::importer::holiday_writer::HolidayWriter;
use crate::importer::row_classifier::RowClassifier as RowClassifierImpl;
use crate::importer::validators::CountryCodeTable;
use crate::repository::holiday_repo::{CountryRepository, HolidayRepository};
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// HolidayImporterImpl - 假日导入器实现
// ==========================================
// 说明: 所有组件以 Arc 持有，clone 成本低，便于投递到阻塞线程池
#[derive(Clone)]
pub struct HolidayImporterImpl {
    // 配置读取器
    config: Arc<dyn ImportConfigReader>,

    // 导入组件
    row_classifier: Arc<dyn RowClassifier>,
    writer: HolidayWriter,
}

impl HolidayImporterImpl {
    /// 创建新的 HolidayImporter 实例
    ///
    /// # 参数
    /// - holiday_repo: 假日记录存储
    /// - country_repo: 国家登记
    /// - config: 配置读取器
    /// - country_codes: ISO3 代码表（启动时构造一次）
    pub fn new(
        holiday_repo: Arc<dyn HolidayRepository>,
        country_repo: Arc<dyn CountryRepository>,
        config: Arc<dyn ImportConfigReader>,
        country_codes: Arc<CountryCodeTable>,
    ) -> Self {
        Self {
            config,
            row_classifier: Arc::new(RowClassifierImpl::new(country_codes)),
            writer: HolidayWriter::new(holiday_repo, country_repo),
        }
    }

    /// 同步导入一个 CSV 输入流
    ///
    /// # 返回
    /// - Ok(IngestionOutcome): inserted + rejected == 计入的数据行数
    /// - Err(MalformedDocument): 表头缺少必需列，未处理任何行
    #[instrument(skip(self, reader), fields(batch_id))]
    pub fn ingest<R: Read>(&self, reader: R) -> ImportResult<IngestionOutcome> {
        let rows = CsvParser.open_reader(reader)?;
        self.ingest_rows(rows)
    }

    /// 同步导入 CSV 文件
    #[instrument(skip(self, file_path), fields(batch_id))]
    pub fn ingest_path(&self, file_path: &Path) -> ImportResult<IngestionOutcome> {
        info!(file_path = %file_path.display(), "开始导入假日文件");
        let rows = CsvParser.open_path(file_path)?;
        self.ingest_rows(rows)
    }

    fn ingest_rows<R: Read>(&self, rows: HolidayRows<R>) -> ImportResult<IngestionOutcome> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        // 参考年份在每次导入开始时读取一次
        let current_year = self.config.get_reference_year()?;
        let skip_blank_rows = self.config.get_skip_blank_rows()?;
        info!(
            batch_id = %batch_id,
            current_year = current_year,
            skip_blank_rows = skip_blank_rows,
            "开始处理数据行"
        );

        let mut outcome = IngestionOutcome::new();
        let mut skipped = 0usize;

        for row in rows {
            let row = match row {
                Ok(row) => row,
                Err(rejection) => {
                    warn!(row_number = rejection.row_number, reason = %rejection.reason, "数据行读取失败");
                    outcome.record_rejection(rejection);
                    continue;
                }
            };

            if skip_blank_rows && row.is_blank() {
                skipped += 1;
                continue;
            }

            let candidate = match self.row_classifier.classify(&row, current_year) {
                RowDecision::Accepted(candidate) => candidate,
                RowDecision::Rejected(rejection) => {
                    debug!(row_number = rejection.row_number, reason = %rejection.reason, "行校验未通过");
                    outcome.record_rejection(rejection);
                    continue;
                }
            };

            match self.writer.insert_candidate(&candidate) {
                Ok(record) => {
                    debug!(
                        row_number = row.row_number,
                        holiday_id = record.id,
                        country_code = %record.country.country_code,
                        "假日已写入"
                    );
                    outcome.record_inserted();
                }
                Err(reason) => {
                    debug!(row_number = row.row_number, reason = %reason, "假日写入被拒绝");
                    outcome.record_rejection(RowRejection::new(row.row_number, reason));
                }
            }
        }

        info!(
            batch_id = %batch_id,
            total = outcome.total_processed,
            inserted = outcome.inserted,
            rejected = outcome.rejected,
            skipped = skipped,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "假日导入完成"
        );

        Ok(outcome)
    }

    /// 单条写入复用的去重写入器
    pub fn writer(&self) -> &HolidayWriter {
        &self.writer
    }
}

#[async_trait::async_trait]
impl HolidayImporter for HolidayImporterImpl {
    async fn import_from_csv<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<IngestionOutcome> {
        let path = file_path.as_ref().to_path_buf();
        let importer = self.clone();

        tokio::task::spawn_blocking(move || importer.ingest_path(&path))
            .await
            .map_err(|e| ImportError::TaskJoinError(e.to_string()))?
    }

    async fn import_document(&self, document: UploadedDocument) -> ImportResult<IngestionOutcome> {
        if document.content.is_empty() {
            return Err(ImportError::EmptyDocument);
        }

        let importer = self.clone();
        let name = document.name;
        let content = document.content;

        tokio::task::spawn_blocking(move || {
            info!(document = %name, bytes = content.len(), "开始导入上传文档");
            importer.ingest(Cursor::new(content))
        })
        .await
        .map_err(|e| ImportError::TaskJoinError(e.to_string()))?
    }

    async fn batch_import(&self, documents: Vec<UploadedDocument>) -> Vec<DocumentOutcome> {
        use futures::future::join_all;

        info!(count = documents.len(), "开始批量导入文档");

        // 为每个文档创建导入任务
        let import_tasks = documents.into_iter().map(|document| {
            let document_name = document.name.clone();
            async move {
                let result = match self.import_document(document).await {
                    Ok(outcome) => Ok(outcome),
                    Err(e) => {
                        error!(document = %document_name, error = %e, "文档导入失败");
                        Err(e.to_string())
                    }
                };
                DocumentOutcome {
                    document_name,
                    result,
                }
            }
        });

        // 并发执行，join_all 保持输入顺序
        let results = join_all(import_tasks).await;

        info!(
            total = results.len(),
            success = results.iter().filter(|r| r.is_ok()).count(),
            failed = results.iter().filter(|r| !r.is_ok()).count(),
            "批量导入完成"
        );

        results
    }
}
