// ==========================================
// 电商仓储发货运营系统 - 订单导出 API
// ==========================================
// 职责: 订单集 → CSV 文本 (固定列集与列序,表头先行)
// 列序约定: orderId, customerName, platform, suggestedCarrier,
//           orderValue, timeRemainingHours, priority
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::order::Order;

/// 导出列头（列序即数据契约,下游按位置消费）
const EXPORT_HEADERS: [&str; 7] = [
    "orderId",
    "customerName",
    "platform",
    "suggestedCarrier",
    "orderValue",
    "timeRemainingHours",
    "priority",
];

/// 将订单集导出为 CSV 文本
///
/// 剩余小时数格式化为一位小数（政策缺项 +∞ 输出 N/A）,
/// 优先分四舍五入为整数
pub fn export_orders_csv(orders: &[Order]) -> ApiResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(EXPORT_HEADERS)
        .map_err(|e| ApiError::ExportError(e.to_string()))?;

    for order in orders {
        writer
            .write_record(&[
                order.order_id.clone(),
                order.customer_name.clone(),
                order.platform.clone(),
                order.suggested_carrier.clone(),
                format_value(order.order_value),
                format_time_remaining(order.time_remaining_hours),
                format!("{}", order.priority.round() as i64),
            ])
            .map_err(|e| ApiError::ExportError(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::ExportError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ApiError::ExportError(e.to_string()))
}

/// 金额: 整数金额不带小数位,其余保留两位
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

/// 剩余小时数: 一位小数; 非有限值输出 N/A
fn format_time_remaining(hours: f64) -> String {
    if hours.is_finite() {
        format!("{:.1}", hours)
    } else {
        "N/A".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::SlaStatus;
    use crate::domain::types::{OrderStatus, SlaLevel, UrgencyTier};
    use chrono::{TimeZone, Utc};

    fn order() -> Order {
        Order {
            order_id: "ORD-001".to_string(),
            customer_name: "Nguyễn Văn An".to_string(),
            platform: "tiktok".to_string(),
            order_value: 1_250_000.0,
            order_time: Utc.with_ymd_and_hms(2026, 3, 10, 6, 0, 0).unwrap(),
            suggested_carrier: "J&T Express".to_string(),
            sla_status: SlaStatus::new(SlaLevel::Safe, UrgencyTier::Low),
            time_remaining_hours: 2.75,
            priority: 19.84,
            status: OrderStatus::Pending,
            confirmed_at: None,
        }
    }

    #[test]
    fn test_export_header_row_first() {
        let csv = export_orders_csv(&[order()]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "orderId,customerName,platform,suggestedCarrier,orderValue,timeRemainingHours,priority"
        );
    }

    #[test]
    fn test_export_row_formatting() {
        let csv = export_orders_csv(&[order()]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "ORD-001,Nguyễn Văn An,tiktok,J&T Express,1250000,2.8,20"
        );
    }

    #[test]
    fn test_export_infinite_time_remaining() {
        let mut o = order();
        o.time_remaining_hours = f64::INFINITY;
        let csv = export_orders_csv(&[o]).unwrap();
        assert!(csv.lines().nth(1).unwrap().contains(",N/A,"));
    }

    #[test]
    fn test_export_empty_set_is_header_only() {
        let csv = export_orders_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
