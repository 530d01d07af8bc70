// ==========================================
// 电商仓储发货运营系统 - 派生状态重算服务
// ==========================================
// 职责: 一次性重算 {sla_status, time_remaining_hours, priority}
// 红线: 三个派生字段必须作为一个整体产出与替换;
//       任何调用方不得绕开本服务单独更新其中一项
// ==========================================

use crate::config::policy_matrix::PolicyMatrix;
use crate::domain::order::{DerivedOrderState, Order};
use crate::engine::priority::PriorityScorer;
use crate::engine::sla::SlaEvaluator;
use chrono::{DateTime, Utc};

/// 重算订单派生状态（流水线首算与刷新器逐拍共用的唯一入口）
///
/// 先判定 SLA 与剩余时间,再基于新的剩余时间计算优先分,
/// 保证 priority 永远与 time_remaining_hours 同步
pub fn derive_order_state(
    order: &Order,
    matrix: &PolicyMatrix,
    now: DateTime<Utc>,
) -> DerivedOrderState {
    let evaluator = SlaEvaluator::new();
    let scorer = PriorityScorer::new();

    let (sla_status, time_remaining_hours) = evaluator.evaluate(order, matrix, now);
    let priority = scorer.score(&order.platform, time_remaining_hours, order.order_value);

    DerivedOrderState {
        sla_status,
        time_remaining_hours,
        priority,
    }
}
