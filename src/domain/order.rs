// ==========================================
// 电商仓储发货运营系统 - 订单领域实体
// ==========================================
// 职责: 定义订单主实体 + 派生状态单元 + 统计摘要
// 红线: sla_status / time_remaining_hours / priority 三者
//       必须作为一个整体替换,禁止单独改写其中一项
// ==========================================

use crate::domain::types::{OrderStatus, SlaLevel, UrgencyTier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 原始订单记录（上传/接口/演示数据的统一输入形态）
///
/// 键值任意、字段可缺失,由 OrderNormalizer 负责类型化
pub type RawOrderRecord = serde_json::Value;

// ==========================================
// SLA 状态 (SlaStatus)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaStatus {
    pub level: SlaLevel,
    pub urgency: UrgencyTier,
}

impl SlaStatus {
    pub fn new(level: SlaLevel, urgency: UrgencyTier) -> Self {
        Self { level, urgency }
    }

    /// 政策矩阵缺项时的状态
    pub fn unknown() -> Self {
        Self {
            level: SlaLevel::Unknown,
            urgency: UrgencyTier::Unknown,
        }
    }
}

// ==========================================
// 派生状态单元 (DerivedOrderState)
// ==========================================
// 每次重算 (流水线首算 / 刷新器逐拍) 产出一个完整单元,
// 通过 Order::apply_derived 原子替换,避免三字段漂移
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedOrderState {
    pub sla_status: SlaStatus,
    pub time_remaining_hours: f64,
    pub priority: f64,
}

// ==========================================
// Order - 订单主实体
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    // 主键（批次内唯一）
    pub order_id: String,

    // 基础信息
    pub customer_name: String,
    /// 销售平台（开放字符串,统一小写; 未识别平台按默认权重参与排序）
    pub platform: String,
    /// 订单金额（标准化后,非负）
    pub order_value: f64,
    /// 下单时间; 无法解析时由清洗流程回退为处理时刻
    pub order_time: DateTime<Utc>,

    // 派生字段（只能经 apply_derived 整体更新）
    pub suggested_carrier: String,
    pub sla_status: SlaStatus,
    /// 剩余可处理小时数; 恒 >= 0,超时钳为 0,政策缺项为 +∞
    pub time_remaining_hours: f64,
    pub priority: f64,

    // 处理状态（批量操作可改写）
    pub status: OrderStatus,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// 以整体单元替换三个派生字段
    pub fn apply_derived(&mut self, derived: DerivedOrderState) {
        self.sla_status = derived.sla_status;
        self.time_remaining_hours = derived.time_remaining_hours;
        self.priority = derived.priority;
    }
}

// ==========================================
// 数据质量摘要 (QualitySummary)
// ==========================================
// 不变量: clean + errors + duplicates == total
// needed_cleaning 是 clean 的子集（经回退/默认值修复的记录数）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualitySummary {
    pub total: usize,
    pub clean: usize,
    pub needed_cleaning: usize,
    pub errors: usize,
    pub duplicates: usize,
}

// ==========================================
// 聚合统计摘要 (AggregateSummary)
// ==========================================
// 驾驶舱卡片数据源; 空订单集返回全零 + "N/A"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub order_count: usize,
    pub expired_count: usize,
    pub critical_count: usize,
    pub warning_count: usize,
    pub safe_count: usize,
    pub unknown_count: usize,
    pub total_value: f64,
    /// 有限值均值; 政策缺项订单 (+∞) 不计入
    pub avg_time_remaining: f64,
    pub top_platform: String,
    pub top_carrier: String,
}

impl Default for AggregateSummary {
    fn default() -> Self {
        Self {
            order_count: 0,
            expired_count: 0,
            critical_count: 0,
            warning_count: 0,
            safe_count: 0,
            unknown_count: 0,
            total_value: 0.0,
            avg_time_remaining: 0.0,
            top_platform: "N/A".to_string(),
            top_carrier: "N/A".to_string(),
        }
    }
}
