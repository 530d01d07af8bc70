// ==========================================
// 电商仓储发货运营系统 - 领域类型定义
// ==========================================
// 职责: SLA 等级体系 / 订单状态 / 查询维度枚举
// 红线: SLA 等级是"等级制",不是评分制
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// SLA 等级 (SLA Level)
// ==========================================
// Unknown 表示政策矩阵缺项,属于定义内状态,不是错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlaLevel {
    Safe,    // 安全
    Warning, // 临近时限
    Expired, // 已超时
    Unknown, // 政策缺项
}

impl fmt::Display for SlaLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlaLevel::Safe => write!(f, "SAFE"),
            SlaLevel::Warning => write!(f, "WARNING"),
            SlaLevel::Expired => write!(f, "EXPIRED"),
            SlaLevel::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl SlaLevel {
    /// 从字符串解析 SLA 等级（大小写不敏感）
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "SAFE" => SlaLevel::Safe,
            "WARNING" => SlaLevel::Warning,
            "EXPIRED" => SlaLevel::Expired,
            _ => SlaLevel::Unknown,
        }
    }
}

// ==========================================
// 紧急层级 (Urgency Tier)
// ==========================================
// 由 SLA 等级派生的粗粒度分桶,用于告警与队列强调
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyTier {
    Low,      // 正常
    Medium,   // 关注
    Critical, // 紧急
    Unknown,  // 政策缺项
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrgencyTier::Low => write!(f, "LOW"),
            UrgencyTier::Medium => write!(f, "MEDIUM"),
            UrgencyTier::Critical => write!(f, "CRITICAL"),
            UrgencyTier::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ==========================================
// 订单处理状态 (Order Status)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与导出数据一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,   // 待确认
    Confirmed, // 已确认
    Packed,    // 已打包
    Shipped,   // 已发货
    Cancelled, // 已取消
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Confirmed => write!(f, "CONFIRMED"),
            OrderStatus::Packed => write!(f, "PACKED"),
            OrderStatus::Shipped => write!(f, "SHIPPED"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl OrderStatus {
    /// 从字符串解析订单状态
    ///
    /// 边界处理: 未识别的状态统一回落为 Pending
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "CONFIRMED" => OrderStatus::Confirmed,
            "PACKED" => OrderStatus::Packed,
            "SHIPPED" => OrderStatus::Shipped,
            "CANCELLED" | "CANCELED" => OrderStatus::Cancelled,
            _ => OrderStatus::Pending,
        }
    }
}

// ==========================================
// 剩余时间分桶 (Time Remaining Bucket)
// ==========================================
// 过滤维度之一; 边界与优先级引擎的紧迫度阈值对齐 (1h / 4h)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeBucket {
    Expired,     // 已超时
    Under1Hour,  // 剩余 < 1h
    Under4Hours, // 剩余 < 4h
    Over4Hours,  // 剩余 >= 4h
}

impl TimeBucket {
    /// 从字符串解析分桶
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "EXPIRED" => Some(TimeBucket::Expired),
            "UNDER_1_HOUR" | "UNDER1HOUR" => Some(TimeBucket::Under1Hour),
            "UNDER_4_HOURS" | "UNDER4HOURS" => Some(TimeBucket::Under4Hours),
            "OVER_4_HOURS" | "OVER4HOURS" => Some(TimeBucket::Over4Hours),
            _ => None,
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeBucket::Expired => write!(f, "EXPIRED"),
            TimeBucket::Under1Hour => write!(f, "UNDER_1_HOUR"),
            TimeBucket::Under4Hours => write!(f, "UNDER_4_HOURS"),
            TimeBucket::Over4Hours => write!(f, "OVER_4_HOURS"),
        }
    }
}

// ==========================================
// 排序字段 (Sort Field)
// ==========================================
// 单键排序; 数值字段按 total_cmp 比较,其余按字典序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    OrderId,
    CustomerName,
    Platform,
    SuggestedCarrier,
    Status,
    OrderTime,
    OrderValue,
    TimeRemainingHours,
    Priority,
}

impl SortField {
    /// 从字符串解析排序字段（camelCase / snake_case 均接受）
    ///
    /// 未识别的字段返回 None,调用方应保持输入顺序
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "orderId" | "order_id" => Some(SortField::OrderId),
            "customerName" | "customer_name" => Some(SortField::CustomerName),
            "platform" => Some(SortField::Platform),
            "suggestedCarrier" | "suggested_carrier" => Some(SortField::SuggestedCarrier),
            "status" => Some(SortField::Status),
            "orderTime" | "order_time" => Some(SortField::OrderTime),
            "orderValue" | "order_value" => Some(SortField::OrderValue),
            "timeRemainingHours" | "time_remaining_hours" => Some(SortField::TimeRemainingHours),
            "priority" => Some(SortField::Priority),
            _ => None,
        }
    }
}

// ==========================================
// 排序方向 (Sort Direction)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Asc
    }
}
