// ==========================================
// 电商仓储发货运营系统 - 订单清洗引擎
// ==========================================
// 职责: 原始记录 → 类型化 Order (金额/时间/平台标准化)
// 红线: 可恢复的脏数据一律降级修复并打 needed_cleaning 标记,
//       只有无法恢复的记录才算失败 (非对象 / 订单号缺失)
// ==========================================

use crate::domain::order::{Order, RawOrderRecord, SlaStatus};
use crate::domain::types::OrderStatus;
use crate::importer::field_mapper::FieldMapper;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use thiserror::Error;

// ==========================================
// 清洗错误 (NormalizationError)
// ==========================================
// 仅覆盖无法恢复的条件; 其余脏数据按规则降级
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("记录不是键值对象 (行 {0})")]
    NotAnObject(usize),

    #[error("订单号缺失或为空 (行 {0})")]
    MissingOrderId(usize),
}

/// 清洗输出: 订单 + 是否经过回退修复
#[derive(Debug, Clone)]
pub struct NormalizedRecord {
    pub order: Order,
    /// 金额/时间/平台任一字段走了默认值或回退路径
    pub needed_cleaning: bool,
}

// ==========================================
// OrderNormalizer - 订单清洗引擎
// ==========================================
pub struct OrderNormalizer {
    mapper: FieldMapper,
}

impl OrderNormalizer {
    pub fn new() -> Self {
        Self {
            mapper: FieldMapper::new(),
        }
    }

    /// 清洗单条原始记录
    ///
    /// # 参数
    /// - `raw`: 原始记录（任意键值）
    /// - `row`: 行号（错误定位用,从 1 起）
    /// - `now`: 处理时刻; 下单时间无法解析时的回退值
    ///
    /// # 返回
    /// - Ok(NormalizedRecord): 类型化订单（派生字段为占位值,由流水线填充）
    /// - Err(NormalizationError): 无法恢复的记录
    pub fn normalize(
        &self,
        raw: &RawOrderRecord,
        row: usize,
        now: DateTime<Utc>,
    ) -> Result<NormalizedRecord, NormalizationError> {
        let record = raw
            .as_object()
            .ok_or(NormalizationError::NotAnObject(row))?;

        let order_id = self
            .mapper
            .get_string(record, "orderId")
            .ok_or(NormalizationError::MissingOrderId(row))?;

        let mut needed_cleaning = false;

        let customer_name = self
            .mapper
            .get_string(record, "customerName")
            .unwrap_or_default();

        let platform = match self.mapper.get_string(record, "platform") {
            Some(p) => p.to_lowercase(),
            None => {
                needed_cleaning = true;
                "unknown".to_string()
            }
        };

        let (order_value, value_dirty) =
            self.parse_order_value(self.mapper.get_value(record, "orderValue"));
        needed_cleaning |= value_dirty;

        let (order_time, time_dirty) =
            self.parse_order_time(self.mapper.get_value(record, "orderTime"), now);
        needed_cleaning |= time_dirty;

        let status = self
            .mapper
            .get_string(record, "status")
            .map(|s| OrderStatus::from_str(&s))
            .unwrap_or(OrderStatus::Pending);

        Ok(NormalizedRecord {
            order: Order {
                order_id,
                customer_name,
                platform,
                order_value,
                order_time,
                // 派生字段占位,由流水线统一填充
                suggested_carrier: String::new(),
                sla_status: SlaStatus::unknown(),
                time_remaining_hours: 0.0,
                priority: 0.0,
                status,
                confirmed_at: None,
            },
            needed_cleaning,
        })
    }

    // ==========================================
    // 金额解析
    // ==========================================

    /// 解析订单金额
    ///
    /// 规则: 数值直通; 字符串剔除 [0-9.] 以外字符后按浮点解析;
    /// 空/无法解析/负数 → 0,并标记走了回退路径
    fn parse_order_value(&self, value: Option<&Value>) -> (f64, bool) {
        match value {
            Some(Value::Number(n)) => {
                let v = n.as_f64().unwrap_or(0.0);
                if v >= 0.0 && v.is_finite() {
                    (v, false)
                } else {
                    (0.0, true)
                }
            }
            Some(Value::String(s)) => {
                let cleaned: String = s.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
                if cleaned.is_empty() {
                    return (0.0, true);
                }
                match cleaned.parse::<f64>() {
                    Ok(v) if v.is_finite() => (v, false),
                    _ => (0.0, true),
                }
            }
            _ => (0.0, true),
        }
    }

    // ==========================================
    // 时间解析
    // ==========================================

    /// 解析下单时间
    ///
    /// 支持: RFC 3339 / "YYYY-MM-DD HH:MM:SS" / "YYYY-MM-DD" /
    ///       "DD/MM/YYYY HH:MM" / "DD/MM/YYYY" / 秒或毫秒时间戳
    /// 无法解析或缺失时回退为 `now`（刻意的降级,不算失败,但计入清洗标记）
    fn parse_order_time(&self, value: Option<&Value>, now: DateTime<Utc>) -> (DateTime<Utc>, bool) {
        match value {
            Some(Value::String(s)) => match Self::parse_datetime_str(s.trim()) {
                Some(ts) => (ts, false),
                None => (now, true),
            },
            Some(Value::Number(n)) => match n.as_i64().and_then(Self::parse_epoch) {
                Some(ts) => (ts, false),
                None => (now, true),
            },
            _ => (now, true),
        }
    }

    fn parse_datetime_str(s: &str) -> Option<DateTime<Utc>> {
        if s.is_empty() {
            return None;
        }

        if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
            return Some(ts.with_timezone(&Utc));
        }

        const DATETIME_FORMATS: [&str; 3] =
            ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M"];
        for format in DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Some(Utc.from_utc_datetime(&naive));
            }
        }

        const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
            }
        }

        None
    }

    /// 时间戳解析: 绝对值超过 10^11 视为毫秒,否则视为秒
    fn parse_epoch(raw: i64) -> Option<DateTime<Utc>> {
        if raw.abs() > 100_000_000_000 {
            Utc.timestamp_millis_opt(raw).single()
        } else {
            Utc.timestamp_opt(raw, 0).single()
        }
    }
}

impl Default for OrderNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
