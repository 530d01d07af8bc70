// ==========================================
// 电商仓储发货运营系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、统计摘要
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod order;
pub mod types;

// 重导出核心类型
pub use order::{
    AggregateSummary, DerivedOrderState, Order, QualitySummary, RawOrderRecord, SlaStatus,
};
pub use types::{OrderStatus, SlaLevel, SortDirection, SortField, TimeBucket, UrgencyTier};
