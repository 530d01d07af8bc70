// ==========================================
// 电商仓储发货运营系统 - 字段映射器
// ==========================================
// 职责: 原始记录键名 → 标准字段解析 (含平台导出别名)
// 来源表头覆盖: 平台导出 (英文) / 本地运营表 (越南语) / 接口 (camelCase)
// ==========================================

use serde_json::{Map, Value};

pub struct FieldMapper;

impl FieldMapper {
    pub fn new() -> Self {
        Self
    }

    /// 标准字段的别名列表（按探测顺序）
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            "orderId" => &["orderId", "order_id", "id", "Order ID", "Mã đơn hàng"],
            "customerName" => &[
                "customerName",
                "customer_name",
                "customer",
                "buyer",
                "Customer Name",
                "Tên khách hàng",
            ],
            "platform" => &["platform", "channel", "source", "Platform", "Kênh bán"],
            "orderValue" => &[
                "orderValue",
                "order_value",
                "value",
                "amount",
                "total",
                "Order Value",
                "Tổng tiền",
            ],
            "orderTime" => &[
                "orderTime",
                "order_time",
                "createdAt",
                "created_at",
                "Order Time",
                "Thời gian đặt hàng",
            ],
            "status" => &["status", "order_status", "orderStatus", "Status", "Trạng thái"],
            _ => &[],
        }
    }

    /// 提取标准字段对应的原始值
    pub fn get_value<'a>(&self, record: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
        for alias in Self::aliases(key) {
            if let Some(value) = record.get(*alias) {
                if !value.is_null() {
                    return Some(value);
                }
            }
        }
        None
    }

    /// 提取标准字段并转为非空字符串（TRIM 后）
    ///
    /// 数值型单元格（Excel 常见）转为十进制字符串
    pub fn get_string(&self, record: &Map<String, Value>, key: &str) -> Option<String> {
        match self.get_value(record, key)? {
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_camel_case_keys() {
        let mapper = FieldMapper::new();
        let row = record(json!({"orderId": "ORD-1", "customerName": "Nguyễn Văn An"}));
        assert_eq!(mapper.get_string(&row, "orderId"), Some("ORD-1".to_string()));
        assert_eq!(
            mapper.get_string(&row, "customerName"),
            Some("Nguyễn Văn An".to_string())
        );
    }

    #[test]
    fn test_alias_keys() {
        let mapper = FieldMapper::new();
        let row = record(json!({"Mã đơn hàng": "ORD-2", "Kênh bán": "shopee"}));
        assert_eq!(mapper.get_string(&row, "orderId"), Some("ORD-2".to_string()));
        assert_eq!(mapper.get_string(&row, "platform"), Some("shopee".to_string()));
    }

    #[test]
    fn test_numeric_cell_to_string() {
        let mapper = FieldMapper::new();
        let row = record(json!({"id": 10023}));
        assert_eq!(mapper.get_string(&row, "orderId"), Some("10023".to_string()));
    }

    #[test]
    fn test_blank_and_null_are_missing() {
        let mapper = FieldMapper::new();
        let row = record(json!({"orderId": "   ", "platform": null}));
        assert_eq!(mapper.get_string(&row, "orderId"), None);
        assert_eq!(mapper.get_string(&row, "platform"), None);
    }
}
