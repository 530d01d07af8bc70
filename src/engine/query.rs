// ==========================================
// 电商仓储发货运营系统 - 订单查询引擎
// ==========================================
// 职责: 过滤 (AND 组合) → 单键稳定排序 → 聚合统计
// 红线: 查询引擎无副作用,可携带不同条件对同一订单集
//       反复调用,绝不改写输入
// ==========================================

use crate::domain::order::{AggregateSummary, Order};
use crate::domain::types::{OrderStatus, SlaLevel, SortDirection, SortField, TimeBucket};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

// ==========================================
// FilterSpec - 过滤条件
// ==========================================
// 所有维度 AND 组合; None / 空串 / "all" 表示该维度不设限,
// 区间条件缺失的一侧视为无界
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    pub platform: Option<String>,
    pub carrier: Option<String>,
    pub status: Option<OrderStatus>,
    pub time_bucket: Option<TimeBucket>,
    /// 订单号/客户名 大小写不敏感子串检索
    pub search: Option<String>,
    pub value_min: Option<f64>,
    pub value_max: Option<f64>,
    pub time_from: Option<DateTime<Utc>>,
    pub time_to: Option<DateTime<Utc>>,
}

impl FilterSpec {
    /// 无任何约束的过滤条件
    pub fn any() -> Self {
        Self::default()
    }

    /// 判定单个订单是否通过全部有效谓词
    fn matches(&self, order: &Order) -> bool {
        if let Some(platform) = active(&self.platform) {
            if !order.platform.eq_ignore_ascii_case(platform) {
                return false;
            }
        }

        if let Some(carrier) = active(&self.carrier) {
            if !order.suggested_carrier.eq_ignore_ascii_case(carrier) {
                return false;
            }
        }

        if let Some(status) = self.status {
            if order.status != status {
                return false;
            }
        }

        if let Some(bucket) = self.time_bucket {
            if !bucket_matches(bucket, order) {
                return false;
            }
        }

        if let Some(needle) = active(&self.search) {
            let needle = needle.to_lowercase();
            let hit = order.order_id.to_lowercase().contains(&needle)
                || order.customer_name.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        if let Some(min) = self.value_min {
            if order.order_value < min {
                return false;
            }
        }
        if let Some(max) = self.value_max {
            if order.order_value > max {
                return false;
            }
        }

        if let Some(from) = self.time_from {
            if order.order_time < from {
                return false;
            }
        }
        if let Some(to) = self.time_to {
            if order.order_time > to {
                return false;
            }
        }

        true
    }
}

/// None / 空串 / "all" 视为未设限
fn active(value: &Option<String>) -> Option<&str> {
    match value.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(v) if v.eq_ignore_ascii_case("all") => None,
        Some(v) => Some(v),
    }
}

/// 分桶谓词; Expired 桶按等级判定,其余桶排除已超时订单
fn bucket_matches(bucket: TimeBucket, order: &Order) -> bool {
    let expired = order.sla_status.level == SlaLevel::Expired;
    match bucket {
        TimeBucket::Expired => expired,
        TimeBucket::Under1Hour => !expired && order.time_remaining_hours < 1.0,
        TimeBucket::Under4Hours => !expired && order.time_remaining_hours < 4.0,
        TimeBucket::Over4Hours => !expired && order.time_remaining_hours >= 4.0,
    }
}

// ==========================================
// SortSpec - 排序条件
// ==========================================
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

// ==========================================
// QueryEngine - 订单查询引擎
// ==========================================
pub struct QueryEngine;

impl QueryEngine {
    pub fn new() -> Self {
        Self
    }

    /// 过滤 + 排序,返回新的订单视图
    ///
    /// 排序为单键稳定排序: 数值字段按 total_cmp (NaN 按 0),
    /// order_time 按时间先后,其余按大小写敏感字典序;
    /// 并列记录保持输入相对顺序; sort 传 None 时保持输入顺序
    pub fn apply(
        &self,
        orders: &[Order],
        filter: &FilterSpec,
        sort: Option<&SortSpec>,
    ) -> Vec<Order> {
        let mut view: Vec<Order> = orders
            .iter()
            .filter(|order| filter.matches(order))
            .cloned()
            .collect();

        if let Some(spec) = sort {
            view.sort_by(|a, b| {
                let ord = compare_by_field(a, b, spec.field);
                match spec.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        view
    }

    /// 聚合统计（驾驶舱卡片数据）
    ///
    /// 空订单集返回全零计数 + "N/A" 众数,绝不报错;
    /// 均值只统计有限剩余时间（政策缺项 +∞ 不计入）
    pub fn summarize(&self, orders: &[Order]) -> AggregateSummary {
        if orders.is_empty() {
            return AggregateSummary::default();
        }

        let mut summary = AggregateSummary {
            order_count: orders.len(),
            ..AggregateSummary::default()
        };

        let mut finite_sum = 0.0;
        let mut finite_count = 0usize;

        for order in orders {
            match order.sla_status.level {
                SlaLevel::Expired => summary.expired_count += 1,
                SlaLevel::Warning => summary.warning_count += 1,
                SlaLevel::Safe => summary.safe_count += 1,
                SlaLevel::Unknown => summary.unknown_count += 1,
            }
            if order.sla_status.urgency == crate::domain::types::UrgencyTier::Critical {
                summary.critical_count += 1;
            }

            summary.total_value += order.order_value;

            if order.time_remaining_hours.is_finite() {
                finite_sum += order.time_remaining_hours;
                finite_count += 1;
            }
        }

        if finite_count > 0 {
            summary.avg_time_remaining = finite_sum / finite_count as f64;
        }

        summary.top_platform = mode(orders.iter().map(|o| o.platform.as_str()));
        summary.top_carrier = mode(orders.iter().map(|o| o.suggested_carrier.as_str()));

        summary
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 比较与众数
// ==========================================

fn compare_by_field(a: &Order, b: &Order, field: SortField) -> Ordering {
    match field {
        SortField::OrderValue => numeric_cmp(a.order_value, b.order_value),
        SortField::TimeRemainingHours => {
            numeric_cmp(a.time_remaining_hours, b.time_remaining_hours)
        }
        SortField::Priority => numeric_cmp(a.priority, b.priority),
        SortField::OrderTime => a.order_time.cmp(&b.order_time),
        SortField::OrderId => a.order_id.cmp(&b.order_id),
        SortField::CustomerName => a.customer_name.cmp(&b.customer_name),
        SortField::Platform => a.platform.cmp(&b.platform),
        SortField::SuggestedCarrier => a.suggested_carrier.cmp(&b.suggested_carrier),
        SortField::Status => a.status.to_string().cmp(&b.status.to_string()),
    }
}

/// 数值比较: NaN 按 0 参与,±∞ 按 total_cmp 自然沉底/置顶
fn numeric_cmp(a: f64, b: f64) -> Ordering {
    let a = if a.is_nan() { 0.0 } else { a };
    let b = if b.is_nan() { 0.0 } else { b };
    a.total_cmp(&b)
}

/// 众数; 并列取先出现者,空输入返回 "N/A"
fn mode<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (index, value) in values.enumerate() {
        *counts.entry(value).or_insert(0) += 1;
        first_seen.entry(value).or_insert(index);
    }

    counts
        .into_iter()
        .max_by(|(va, ca), (vb, cb)| {
            ca.cmp(cb)
                .then_with(|| first_seen[vb].cmp(&first_seen[va]))
        })
        .map(|(value, _)| value.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
