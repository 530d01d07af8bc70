// ==========================================
// 电商仓储发货运营系统 - API 层
// ==========================================
// 职责: 面向宿主应用的操作入口 (批量确认 / 导出)
// ==========================================

pub mod error;
pub mod export;
pub mod order_actions;

pub use error::{ApiError, ApiResult};
pub use export::export_orders_csv;
pub use order_actions::confirm_orders;
