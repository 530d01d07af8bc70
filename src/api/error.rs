// ==========================================
// 电商仓储发货运营系统 - API 层错误类型
// ==========================================

use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("导出失败: {0}")]
    ExportError(String),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
