// ==========================================
// 公共假日登记系统 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::importer::error::ImportResult;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入模块所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait ImportConfigReader: Send + Sync {
    /// 获取“当年”判定所用的年份
    ///
    /// # 返回
    /// - i32: 参考年份
    ///
    /// # 默认值
    /// - 调用时刻本地时钟的年份（每次调用重新读取）
    fn get_reference_year(&self) -> ImportResult<i32>;

    /// 是否跳过四个必填字段全部为空的行
    ///
    /// # 返回
    /// - true: 跳过且不计入处理总数
    /// - false: 按“必填字段为空”拒绝并计数
    ///
    /// # 默认值
    /// - false
    fn get_skip_blank_rows(&self) -> ImportResult<bool>;
}
