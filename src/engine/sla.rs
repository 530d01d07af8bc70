// ==========================================
// 电商仓储发货运营系统 - SLA 时限判定引擎
// ==========================================
// 职责: (order, 政策矩阵, now) → SLA 等级 + 剩余小时数
// 红线: 纯函数,now 必须显式传入,引擎内禁止取墙钟
//       矩阵缺项 → Unknown 分类,不是错误
// ==========================================

use crate::config::policy_matrix::PolicyMatrix;
use crate::domain::order::{Order, SlaStatus};
use crate::domain::types::{SlaLevel, UrgencyTier};
use chrono::{DateTime, Utc};

/// 进入 Warning 等级的时限消耗比例 (严格大于)
pub const WARNING_RATIO: f64 = 0.8;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

// ==========================================
// SlaEvaluator - SLA 时限判定引擎
// ==========================================
pub struct SlaEvaluator;

impl SlaEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// 判定订单 SLA 状态与剩余小时数
    ///
    /// 算法:
    /// 1) hours_since = (now - order_time) / 1h
    /// 2) 按 (platform, suggested_carrier) 查政策矩阵;
    ///    缺项 → (Unknown, Unknown),剩余 +∞ (排序时沉底,不阻塞队列)
    /// 3) hours_since > deadline (严格) → Expired/Critical,剩余钳为 0
    /// 4) hours_since > 0.8 × deadline (严格,等于边界仍为 Safe) → Warning/Medium
    /// 5) 其他 → Safe/Low
    /// 6) 剩余 = (order_time + deadline) - now,钳为 >= 0
    ///
    /// 幂等: 相同 (order, matrix, now) 必然得到相同结果
    pub fn evaluate(
        &self,
        order: &Order,
        matrix: &PolicyMatrix,
        now: DateTime<Utc>,
    ) -> (SlaStatus, f64) {
        let entry = match matrix.lookup(&order.platform, &order.suggested_carrier) {
            Some(entry) => entry,
            None => return (SlaStatus::unknown(), f64::INFINITY),
        };

        let deadline = entry.confirm_deadline_hours;
        let hours_since =
            (now - order.order_time).num_milliseconds() as f64 / MILLIS_PER_HOUR;

        if hours_since > deadline {
            return (
                SlaStatus::new(SlaLevel::Expired, UrgencyTier::Critical),
                0.0,
            );
        }

        let time_remaining = (deadline - hours_since).max(0.0);

        if hours_since > WARNING_RATIO * deadline {
            (
                SlaStatus::new(SlaLevel::Warning, UrgencyTier::Medium),
                time_remaining,
            )
        } else {
            (
                SlaStatus::new(SlaLevel::Safe, UrgencyTier::Low),
                time_remaining,
            )
        }
    }
}

impl Default for SlaEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
