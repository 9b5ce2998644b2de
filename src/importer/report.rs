// ==========================================
// 公共假日登记系统 - 导入报告格式化
// ==========================================
// 职责: 将 IngestionOutcome / 批量结果渲染为文本报告
// 红线: 纯函数，输出只依赖输入
// ==========================================

use crate::domain::outcome::{DocumentOutcome, IngestionOutcome};
use std::fmt::Write;

/// 渲染单文档报告
///
/// 固定顺序: 处理总数 → 成功数 → 拒绝数 → 按行号顺序的拒绝原因（每行一条）
pub fn format_outcome(outcome: &IngestionOutcome) -> String {
    let mut out = String::new();
    // 写入 String 不会失败
    let _ = writeln!(
        out,
        "Total number of records processed : {}",
        outcome.inserted + outcome.rejected
    );
    let _ = writeln!(out, "Number of successfully records : {}", outcome.inserted);
    let _ = writeln!(out, "Number of rejected records : {}", outcome.rejected);

    let mut rejections: Vec<_> = outcome.rejection_log.iter().collect();
    rejections.sort_by_key(|r| r.row_number);
    for rejection in rejections {
        let _ = writeln!(out, "{}", rejection);
    }
    out
}

/// 渲染批量报告
///
/// 每个文档以 `File <n> : <name>` 开头，随后是该文档的报告或文档级错误
pub fn format_batch(outcomes: &[DocumentOutcome]) -> String {
    let mut out = String::new();
    for (idx, document) in outcomes.iter().enumerate() {
        let _ = writeln!(out, "File {} : {}", idx + 1, document.document_name);
        match &document.result {
            Ok(outcome) => out.push_str(&format_outcome(outcome)),
            Err(message) => {
                let _ = writeln!(out, "{}", message);
            }
        }
    }
    out
}
