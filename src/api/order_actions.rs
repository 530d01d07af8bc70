// ==========================================
// 电商仓储发货运营系统 - 订单批量操作 API
// ==========================================
// 职责: 批量确认 (刷新器之外唯一的外部订单状态变更入口)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::order::Order;
use crate::domain::types::OrderStatus;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// 批量确认订单
///
/// 将命中订单号的订单置为 Confirmed 并记录确认时刻;
/// 已确认的订单保持原确认时刻不变
///
/// # 参数
/// - `orders`: 订单集（就地改写 status / confirmed_at）
/// - `order_ids`: 目标订单号列表
/// - `now`: 确认时刻
///
/// # 返回
/// - Ok(usize): 本次新确认的订单数
/// - Err(InvalidInput): 订单号列表为空
pub fn confirm_orders(
    orders: &mut [Order],
    order_ids: &[String],
    now: DateTime<Utc>,
) -> ApiResult<usize> {
    if order_ids.is_empty() {
        return Err(ApiError::InvalidInput("订单号列表不能为空".to_string()));
    }

    let targets: HashSet<&str> = order_ids.iter().map(String::as_str).collect();
    let mut confirmed = 0usize;

    for order in orders.iter_mut() {
        if !targets.contains(order.order_id.as_str()) {
            continue;
        }
        if order.status == OrderStatus::Confirmed {
            continue;
        }
        order.status = OrderStatus::Confirmed;
        order.confirmed_at = Some(now);
        confirmed += 1;
    }

    tracing::info!("批量确认完成: 命中 {} / 请求 {}", confirmed, order_ids.len());

    Ok(confirmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::SlaStatus;
    use chrono::TimeZone;

    fn order(id: &str) -> Order {
        Order {
            order_id: id.to_string(),
            customer_name: String::new(),
            platform: "shopee".to_string(),
            order_value: 100_000.0,
            order_time: Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap(),
            suggested_carrier: "GHTK".to_string(),
            sla_status: SlaStatus::unknown(),
            time_remaining_hours: 0.0,
            priority: 0.0,
            status: OrderStatus::Pending,
            confirmed_at: None,
        }
    }

    #[test]
    fn test_confirm_matching_orders() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
        let mut orders = vec![order("ORD-1"), order("ORD-2"), order("ORD-3")];

        let count =
            confirm_orders(&mut orders, &["ORD-1".to_string(), "ORD-3".to_string()], now).unwrap();

        assert_eq!(count, 2);
        assert_eq!(orders[0].status, OrderStatus::Confirmed);
        assert_eq!(orders[0].confirmed_at, Some(now));
        assert_eq!(orders[1].status, OrderStatus::Pending);
        assert_eq!(orders[2].status, OrderStatus::Confirmed);
    }

    #[test]
    fn test_already_confirmed_keeps_timestamp() {
        let first = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2026, 3, 10, 10, 0, 0).unwrap();
        let mut orders = vec![order("ORD-1")];

        confirm_orders(&mut orders, &["ORD-1".to_string()], first).unwrap();
        let count = confirm_orders(&mut orders, &["ORD-1".to_string()], second).unwrap();

        assert_eq!(count, 0);
        assert_eq!(orders[0].confirmed_at, Some(first));
    }

    #[test]
    fn test_empty_id_list_rejected() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
        let mut orders = vec![order("ORD-1")];
        assert!(confirm_orders(&mut orders, &[], now).is_err());
    }
}
