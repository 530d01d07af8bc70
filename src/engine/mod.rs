// ==========================================
// 电商仓储发货运营系统 - 引擎层
// ==========================================
// 职责: 实现业务规则引擎 (清洗/推荐/判定/评分/查询/刷新)
// 红线: 判定引擎全部为纯函数,now 显式传入;
//       派生字段只经 derivation 整体重算
// ==========================================

pub mod carrier;
pub mod clock;
pub mod derivation;
pub mod normalizer;
pub mod pipeline;
pub mod priority;
pub mod query;
pub mod refresher;
pub mod sla;

// 重导出核心引擎
pub use carrier::CarrierSuggester;
pub use clock::{Clock, ManualClock, SystemClock};
pub use derivation::derive_order_state;
pub use normalizer::{NormalizationError, NormalizedRecord, OrderNormalizer};
pub use pipeline::{OrderPipeline, PipelineOutcome};
pub use priority::PriorityScorer;
pub use query::{FilterSpec, QueryEngine, SortSpec};
pub use refresher::{RealtimeRefresher, RefreshError, RefreshHandle, SharedOrders};
pub use sla::SlaEvaluator;
