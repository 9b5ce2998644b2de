// ==========================================
// 公共假日登记系统 - 假日导入 Trait
// ==========================================
// 职责: 定义假日导入接口与行分类接口（不包含实现）
// ==========================================

use crate::domain::holiday::RawHolidayRow;
use crate::domain::outcome::{DocumentOutcome, IngestionOutcome, RowDecision, UploadedDocument};
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// HolidayImporter Trait
// ==========================================
// 用途: 假日批量导入主接口
// 实现者: HolidayImporterImpl
#[async_trait]
pub trait HolidayImporter: Send + Sync {
    /// 从 CSV 文件导入假日数据
    ///
    /// # 返回
    /// - Ok(IngestionOutcome): 导入结果（可能全部被拒绝）
    /// - Err: 文件不存在、格式不支持、表头缺失等文档级错误
    async fn import_from_csv<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<IngestionOutcome>;

    /// 导入单个上传文档
    ///
    /// # 返回
    /// - Err(EmptyDocument): 上传内容为空
    /// - Err(MalformedDocument): 表头缺少必需列，整文档不处理
    async fn import_document(&self, document: UploadedDocument) -> ImportResult<IngestionOutcome>;

    /// 批量导入多个文档（并发执行）
    ///
    /// # 说明
    /// - 每个文档独立处理，单个文档失败不影响其他文档
    /// - 结果顺序与输入顺序一致
    /// - 文档内按行号顺序处理
    async fn batch_import(&self, documents: Vec<UploadedDocument>) -> Vec<DocumentOutcome>;
}

// ==========================================
// RowClassifier Trait
// ==========================================
// 用途: 单行字段校验（不访问存储）
// 实现者: RowClassifierImpl
pub trait RowClassifier: Send + Sync {
    /// 校验一行并给出接受/拒绝结论
    ///
    /// # 判定顺序（首个失败即返回）
    /// 1. 四个必填字段任一为空
    /// 2. 日期格式非 YYYY-MM-DD
    /// 3. 日期不在参考年份
    /// 4. 国家代码不是 ISO3 代码
    ///
    /// # 参数
    /// - row: 原始行（字段已 TRIM）
    /// - current_year: 参考年份
    fn classify(&self, row: &RawHolidayRow, current_year: i32) -> RowDecision;
}
