// ==========================================
// 电商仓储发货运营系统 - 演示数据生成器
// ==========================================
// 职责: 生成确定性的演示订单批次 (控制台演示 / 回归测试)
// 约定: 订单号批内唯一; 固定比例的脏数据走可恢复路径,
//       不产生清洗失败记录
// ==========================================

use crate::domain::order::RawOrderRecord;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

const PLATFORMS: [&str; 5] = ["tiktok", "shopee", "website", "shopee", "tiktok"];

const CUSTOMERS: [&str; 8] = [
    "Nguyễn Văn An",
    "Trần Thị Bích",
    "Lê Minh Châu",
    "Phạm Quốc Đạt",
    "Hoàng Thu Hà",
    "Vũ Đức Huy",
    "Đặng Ngọc Lan",
    "Bùi Thanh Sơn",
];

/// 生成确定性的演示订单批次
///
/// 同一 (count, now) 输入必然生成相同批次:
/// - 订单号 ORD-10000 起连续编号,批内唯一
/// - 平台/客户/金额/下单时间按固定表轮转
/// - 每 10 条中: 1 条金额为带货币符号的字符串 (可恢复),
///   1 条下单时间无法解析 (触发回退到处理时刻)
pub fn generate_demo_orders(count: usize, now: DateTime<Utc>) -> Vec<RawOrderRecord> {
    (0..count)
        .map(|i| {
            let order_id = format!("ORD-{:05}", 10_000 + i);
            let customer = CUSTOMERS[i % CUSTOMERS.len()];
            let platform = PLATFORMS[i % PLATFORMS.len()];

            // 金额: 5 万 ~ 450 万 VND 之间的确定性伪随机分布
            let value = 50_000 + ((i * 7_919) % 30) * 150_000;

            // 下单时间: 0 ~ 29 小时前,带分钟级错位
            let hours_ago = (i * 37) % 30;
            let minutes_ago = (i * 13) % 60;
            let order_time =
                now - Duration::hours(hours_ago as i64) - Duration::minutes(minutes_ago as i64);

            let order_value = if i % 10 == 7 {
                // 脏数据: 带货币符号与千分位的金额字符串
                json!(format!("₫{}", group_thousands(value)))
            } else {
                json!(value)
            };

            let order_time_field = if i % 10 == 9 {
                // 脏数据: 无法解析的时间,触发回退
                json!("chưa rõ")
            } else {
                json!(order_time.to_rfc3339())
            };

            json!({
                "orderId": order_id,
                "customerName": customer,
                "platform": platform,
                "orderValue": order_value,
                "orderTime": order_time_field,
                "status": "pending"
            })
        })
        .collect()
}

/// 千分位分组 (演示数据的脏金额格式)
fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
