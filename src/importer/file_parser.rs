// ==========================================
// 公共假日登记系统 - CSV 文件解析器
// ==========================================
// 职责: 表头校验 + 流式逐行读取
// 约束: 表头为第 1 行，首个数据行报告为第 2 行
// ==========================================

use crate::domain::holiday::RawHolidayRow;
use crate::domain::outcome::{RejectionReason, RowRejection};
use crate::importer::error::{ImportError, ImportResult};
use csv::{ReaderBuilder, StringRecordsIntoIter, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 必需列（顺序即缺失列报告顺序）
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "country_code",
    "country_name",
    "holiday_date",
    "holiday_name",
];

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 打开 CSV 文件
    ///
    /// # 返回
    /// - Err(FileNotFound): 文件不存在
    /// - Err(UnsupportedFormat): 扩展名不是 .csv
    /// - Err(MalformedDocument): 表头缺少必需列
    pub fn open_path(&self, file_path: &Path) -> ImportResult<HolidayRows<File>> {
        // 检查文件存在
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        // 检查扩展名
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        self.open_reader(file)
    }

    /// 从任意输入流打开 CSV，读取并校验表头
    pub fn open_reader<R: Read>(&self, reader: R) -> ImportResult<HolidayRows<R>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .trim(Trim::All)
            .from_reader(reader);

        // 读取表头（列名忽略大小写）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();

        // 没有任何表头记录才算空文档；空白表头按缺列处理
        if headers.is_empty() {
            return Err(ImportError::EmptyDocument);
        }

        let mut column_index = [0usize; 4];
        let mut missing = Vec::new();
        for (slot, column) in REQUIRED_COLUMNS.iter().enumerate() {
            match headers.iter().position(|h| h == column) {
                Some(idx) => column_index[slot] = idx,
                None => missing.push(column.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(ImportError::MalformedDocument { missing });
        }

        Ok(HolidayRows {
            records: reader.into_records(),
            column_index,
            record_index: 0,
            finished: false,
        })
    }
}

// ==========================================
// HolidayRows - 数据行迭代器
// ==========================================
// 说明: 单行读取失败（如非 UTF-8）以该行的拒绝记录返回，迭代继续
//       底层 I/O 失败记录一次后停止迭代
pub struct HolidayRows<R: Read> {
    records: StringRecordsIntoIter<R>,
    column_index: [usize; 4],
    record_index: usize,
    finished: bool,
}

impl<R: Read> Iterator for HolidayRows<R> {
    type Item = Result<RawHolidayRow, RowRejection>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.records.next()?;
        self.record_index += 1;
        let row_number = self.record_index + 1;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                if e.is_io_error() {
                    self.finished = true;
                }
                return Some(Err(RowRejection::new(
                    row_number,
                    RejectionReason::Failure(e.to_string()),
                )))
            }
        };

        let field = |slot: usize| -> String {
            record
                .get(self.column_index[slot])
                .unwrap_or("")
                .trim()
                .to_string()
        };

        Some(Ok(RawHolidayRow {
            row_number,
            country_code: field(0),
            country_name: field(1),
            holiday_date: field(2),
            holiday_name: field(3),
        }))
    }
}
