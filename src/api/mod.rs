// ==========================================
// 公共假日登记系统 - API 层
// ==========================================
// 职责: 提供与传输层无关的业务 API 接口
// ==========================================

pub mod dto;
pub mod error;
pub mod holiday_api;

// 重导出核心类型
pub use dto::{HolidayRequest, HolidayResponse, HolidayUpdateRequest, HolidayView};
pub use error::{ApiError, ApiResult};
pub use holiday_api::HolidayApi;
