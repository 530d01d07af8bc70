// ==========================================
// 电商仓储发货运营系统 - 承运商推荐引擎
// ==========================================
// 职责: (platform, order_value) → 建议承运商
// 红线: 推荐是小型决策表,不是模型; 规则按优先级顺序执行,
//       命中即返回,必须可按字面输入输出对审计
// ==========================================

/// 快速承运商 (tiktok 考核 / 高价值自营单)
pub const FAST_CARRIER: &str = "J&T Express";
/// 经济承运商 (shopee 低价值单)
pub const ECONOMY_CARRIER: &str = "GHTK";
/// 默认承运商
pub const DEFAULT_CARRIER: &str = "Viettel Post";

/// 自营渠道改走快速承运商的金额下限 (严格大于)
pub const WEBSITE_FAST_VALUE_THRESHOLD: f64 = 2_000_000.0;
/// shopee 改走经济承运商的金额上限 (严格小于)
pub const SHOPEE_ECONOMY_VALUE_THRESHOLD: f64 = 500_000.0;

// ==========================================
// CarrierSuggester - 承运商推荐引擎
// ==========================================
pub struct CarrierSuggester;

impl CarrierSuggester {
    pub fn new() -> Self {
        Self
    }

    /// 推荐承运商
    ///
    /// 规则（顺序执行,命中即返回）:
    /// 1) platform == "tiktok" → 快速承运商
    /// 2) platform == "website" 且 order_value > 2,000,000 → 快速承运商
    /// 3) platform == "shopee" 且 order_value < 500,000 → 经济承运商
    /// 4) 其他 → 默认承运商
    ///
    /// 边界处理: 两处阈值均为严格比较,等于阈值时落入规则 4
    pub fn suggest(&self, platform: &str, order_value: f64) -> &'static str {
        let platform = platform.trim().to_lowercase();

        // 规则1: tiktok 一律快速承运商
        if platform == "tiktok" {
            return FAST_CARRIER;
        }

        // 规则2: 高价值自营单走快速承运商
        if platform == "website" && order_value > WEBSITE_FAST_VALUE_THRESHOLD {
            return FAST_CARRIER;
        }

        // 规则3: shopee 低价值单走经济承运商
        if platform == "shopee" && order_value < SHOPEE_ECONOMY_VALUE_THRESHOLD {
            return ECONOMY_CARRIER;
        }

        // 规则4: 默认
        DEFAULT_CARRIER
    }
}

impl Default for CarrierSuggester {
    fn default() -> Self {
        Self::new()
    }
}
