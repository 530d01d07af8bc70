// ==========================================
// 电商仓储发货运营系统 - 优先级评分引擎
// ==========================================
// 职责: (平台权重, 剩余时间紧迫度, 订单金额) → 综合优先分
// 红线: 剩余时间变化时必须重算,禁止跨刷新拍缓存
// ==========================================

use crate::domain::order::Order;

/// 平台权重项系数
pub const PLATFORM_WEIGHT_FACTOR: f64 = 3.0;
/// 紧迫度项系数
pub const URGENCY_SCORE_FACTOR: f64 = 2.0;
/// 金额项系数
pub const VALUE_SCORE_FACTOR: f64 = 1.0;
/// 金额项封顶（百万为单位,封顶 3 分）
pub const VALUE_SCORE_CAP: f64 = 3.0;

// ==========================================
// PriorityScorer - 优先级评分引擎
// ==========================================
pub struct PriorityScorer;

impl PriorityScorer {
    pub fn new() -> Self {
        Self
    }

    /// 计算优先分（分数越高越优先）
    ///
    /// 公式: platform_weight × 3 + urgency_score × 2 + min(value / 1e6, 3) × 1
    pub fn score(&self, platform: &str, time_remaining_hours: f64, order_value: f64) -> f64 {
        Self::platform_weight(platform) * PLATFORM_WEIGHT_FACTOR
            + Self::urgency_score(time_remaining_hours) * URGENCY_SCORE_FACTOR
            + (order_value / 1_000_000.0).min(VALUE_SCORE_CAP) * VALUE_SCORE_FACTOR
    }

    /// 按订单当前字段计算优先分
    pub fn score_order(&self, order: &Order) -> f64 {
        self.score(&order.platform, order.time_remaining_hours, order.order_value)
    }

    /// 平台权重: tiktok=3, website=2, shopee=1, 其他=1
    pub fn platform_weight(platform: &str) -> f64 {
        match platform.trim().to_lowercase().as_str() {
            "tiktok" => 3.0,
            "website" => 2.0,
            "shopee" => 1.0,
            _ => 1.0,
        }
    }

    /// 紧迫度分: 剩余 < 1h → 10, < 4h → 5, 其他 (含 +∞) → 1
    pub fn urgency_score(time_remaining_hours: f64) -> f64 {
        if time_remaining_hours < 1.0 {
            10.0
        } else if time_remaining_hours < 4.0 {
            5.0
        } else {
            1.0
        }
    }
}

impl Default for PriorityScorer {
    fn default() -> Self {
        Self::new()
    }
}
