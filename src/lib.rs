// ==========================================
// 电商仓储发货运营系统 - 核心库
// ==========================================
// 系统定位: 发货 SLA 时限与优先级引擎 (决策支持,人工最终控制权)
// 技术栈: Rust + tokio
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 政策矩阵
pub mod config;

// API 层 - 业务接口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    OrderStatus, SlaLevel, SortDirection, SortField, TimeBucket, UrgencyTier,
};

// 领域实体
pub use domain::{
    AggregateSummary, DerivedOrderState, Order, QualitySummary, RawOrderRecord, SlaStatus,
};

// 配置
pub use config::{PolicyEntry, PolicyMatrix, PolicyRule};

// 引擎
pub use engine::{
    derive_order_state, CarrierSuggester, Clock, FilterSpec, ManualClock, OrderNormalizer,
    OrderPipeline, PipelineOutcome, PriorityScorer, QueryEngine, RealtimeRefresher, RefreshError,
    RefreshHandle, SharedOrders, SlaEvaluator, SortSpec, SystemClock,
};

// API
pub use api::{confirm_orders, export_orders_csv, ApiError, ApiResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "电商仓储发货运营系统";

// ==========================================
// 预编译检查
// ==========================================
