// ==========================================
// 电商仓储发货运营系统 - 查询引擎集成测试
// ==========================================
// 覆盖: AND 过滤 / 单键稳定排序 / 聚合统计 / 空输入 / 无副作用
// ==========================================

use chrono::{DateTime, Duration, TimeZone, Utc};
use shipping_ops::domain::order::{Order, SlaStatus};
use shipping_ops::domain::types::{
    OrderStatus, SlaLevel, SortDirection, SortField, TimeBucket, UrgencyTier,
};
use shipping_ops::{FilterSpec, QueryEngine, SortSpec};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 8, 0, 0).unwrap()
}

fn order(
    id: &str,
    customer: &str,
    platform: &str,
    carrier: &str,
    value: f64,
    remaining: f64,
    level: SlaLevel,
    hours_offset: i64,
) -> Order {
    let urgency = match level {
        SlaLevel::Safe => UrgencyTier::Low,
        SlaLevel::Warning => UrgencyTier::Medium,
        SlaLevel::Expired => UrgencyTier::Critical,
        SlaLevel::Unknown => UrgencyTier::Unknown,
    };
    Order {
        order_id: id.to_string(),
        customer_name: customer.to_string(),
        platform: platform.to_string(),
        order_value: value,
        order_time: base_time() + Duration::hours(hours_offset),
        suggested_carrier: carrier.to_string(),
        sla_status: SlaStatus::new(level, urgency),
        time_remaining_hours: remaining,
        priority: value / 100_000.0,
        status: OrderStatus::Pending,
        confirmed_at: None,
    }
}

/// 固定订单集: 5 条覆盖各平台/等级
fn fixture() -> Vec<Order> {
    vec![
        order("ORD-001", "Nguyễn Văn An", "tiktok", "J&T Express", 1_200_000.0, 0.0, SlaLevel::Expired, 0),
        order("ORD-002", "Trần Thị Bích", "shopee", "GHTK", 400_000.0, 0.5, SlaLevel::Warning, 1),
        order("ORD-003", "Lê Minh Châu", "shopee", "Viettel Post", 800_000.0, 6.0, SlaLevel::Safe, 2),
        order("ORD-004", "Phạm Quốc Đạt", "website", "Viettel Post", 2_500_000.0, 20.0, SlaLevel::Safe, 3),
        order("ORD-005", "Hoàng Thu Hà", "lazada", "Viettel Post", 300_000.0, f64::INFINITY, SlaLevel::Unknown, 4),
    ]
}

// ==========================================
// 第一部分：空输入
// ==========================================

#[test]
fn test_apply_empty_input() {
    let engine = QueryEngine::new();
    let result = engine.apply(&[], &FilterSpec::any(), None);
    assert!(result.is_empty());
}

#[test]
fn test_summarize_empty_input() {
    let engine = QueryEngine::new();
    let summary = engine.summarize(&[]);
    assert_eq!(summary.top_platform, "N/A");
    assert_eq!(summary.top_carrier, "N/A");
    assert_eq!(summary.order_count, 0);
    assert_eq!(summary.total_value, 0.0);
    assert_eq!(summary.avg_time_remaining, 0.0);
}

// ==========================================
// 第二部分：过滤
// ==========================================

#[test]
fn test_filter_by_platform() {
    let engine = QueryEngine::new();
    let filter = FilterSpec {
        platform: Some("shopee".to_string()),
        ..FilterSpec::default()
    };
    let result = engine.apply(&fixture(), &filter, None);
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|o| o.platform == "shopee"));
}

#[test]
fn test_filter_all_means_unconstrained() {
    let engine = QueryEngine::new();
    let filter = FilterSpec {
        platform: Some("all".to_string()),
        carrier: Some("".to_string()),
        ..FilterSpec::default()
    };
    let result = engine.apply(&fixture(), &filter, None);
    assert_eq!(result.len(), 5);
}

#[test]
fn test_search_is_case_insensitive_over_id_and_name() {
    let engine = QueryEngine::new();

    let by_id = FilterSpec {
        search: Some("ord-004".to_string()),
        ..FilterSpec::default()
    };
    let result = engine.apply(&fixture(), &by_id, None);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].order_id, "ORD-004");

    let by_name = FilterSpec {
        search: Some("trần".to_string()),
        ..FilterSpec::default()
    };
    let result = engine.apply(&fixture(), &by_name, None);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].order_id, "ORD-002");
}

#[test]
fn test_value_range_half_open() {
    let engine = QueryEngine::new();

    // 仅下界
    let filter = FilterSpec {
        value_min: Some(800_000.0),
        ..FilterSpec::default()
    };
    let result = engine.apply(&fixture(), &filter, None);
    assert_eq!(result.len(), 3);

    // 仅上界
    let filter = FilterSpec {
        value_max: Some(400_000.0),
        ..FilterSpec::default()
    };
    let result = engine.apply(&fixture(), &filter, None);
    assert_eq!(result.len(), 2);
}

#[test]
fn test_time_range_filter() {
    let engine = QueryEngine::new();
    let filter = FilterSpec {
        time_from: Some(base_time() + Duration::hours(1)),
        time_to: Some(base_time() + Duration::hours(3)),
        ..FilterSpec::default()
    };
    let result = engine.apply(&fixture(), &filter, None);
    let ids: Vec<&str> = result.iter().map(|o| o.order_id.as_str()).collect();
    assert_eq!(ids, vec!["ORD-002", "ORD-003", "ORD-004"]);
}

#[test]
fn test_time_bucket_filters() {
    let engine = QueryEngine::new();

    let expired = FilterSpec {
        time_bucket: Some(TimeBucket::Expired),
        ..FilterSpec::default()
    };
    assert_eq!(engine.apply(&fixture(), &expired, None).len(), 1);

    let under_1h = FilterSpec {
        time_bucket: Some(TimeBucket::Under1Hour),
        ..FilterSpec::default()
    };
    let result = engine.apply(&fixture(), &under_1h, None);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].order_id, "ORD-002");

    // Over4Hours 不含已超时与政策缺项外的比较: +∞ >= 4h 也命中
    let over_4h = FilterSpec {
        time_bucket: Some(TimeBucket::Over4Hours),
        ..FilterSpec::default()
    };
    let ids: Vec<String> = engine
        .apply(&fixture(), &over_4h, None)
        .iter()
        .map(|o| o.order_id.clone())
        .collect();
    assert_eq!(ids, vec!["ORD-003", "ORD-004", "ORD-005"]);
}

#[test]
fn test_predicates_and_combined() {
    let engine = QueryEngine::new();
    let filter = FilterSpec {
        platform: Some("shopee".to_string()),
        value_min: Some(500_000.0),
        ..FilterSpec::default()
    };
    let result = engine.apply(&fixture(), &filter, None);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].order_id, "ORD-003");
}

// ==========================================
// 第三部分：排序
// ==========================================

#[test]
fn test_numeric_sort_infinity_last() {
    let engine = QueryEngine::new();
    let sort = SortSpec::new(SortField::TimeRemainingHours, SortDirection::Asc);
    let result = engine.apply(&fixture(), &FilterSpec::any(), Some(&sort));
    let ids: Vec<&str> = result.iter().map(|o| o.order_id.as_str()).collect();
    assert_eq!(ids, vec!["ORD-001", "ORD-002", "ORD-003", "ORD-004", "ORD-005"]);
}

#[test]
fn test_numeric_sort_desc() {
    let engine = QueryEngine::new();
    let sort = SortSpec::new(SortField::OrderValue, SortDirection::Desc);
    let result = engine.apply(&fixture(), &FilterSpec::any(), Some(&sort));
    assert_eq!(result[0].order_id, "ORD-004");
    assert_eq!(result[4].order_id, "ORD-005");
}

#[test]
fn test_string_sort_lexicographic() {
    let engine = QueryEngine::new();
    let sort = SortSpec::new(SortField::Platform, SortDirection::Asc);
    let result = engine.apply(&fixture(), &FilterSpec::any(), Some(&sort));
    let platforms: Vec<&str> = result.iter().map(|o| o.platform.as_str()).collect();
    assert_eq!(platforms, vec!["lazada", "shopee", "shopee", "tiktok", "website"]);
}

#[test]
fn test_sort_is_stable_on_ties() {
    let engine = QueryEngine::new();
    let mut orders = fixture();
    // 将全部金额改为同值, 排序后必须保持输入相对顺序
    for o in orders.iter_mut() {
        o.order_value = 500_000.0;
    }
    let sort = SortSpec::new(SortField::OrderValue, SortDirection::Asc);
    let result = engine.apply(&orders, &FilterSpec::any(), Some(&sort));
    let ids: Vec<&str> = result.iter().map(|o| o.order_id.as_str()).collect();
    assert_eq!(ids, vec!["ORD-001", "ORD-002", "ORD-003", "ORD-004", "ORD-005"]);
}

#[test]
fn test_no_sort_preserves_input_order() {
    let engine = QueryEngine::new();
    let result = engine.apply(&fixture(), &FilterSpec::any(), None);
    let ids: Vec<&str> = result.iter().map(|o| o.order_id.as_str()).collect();
    assert_eq!(ids, vec!["ORD-001", "ORD-002", "ORD-003", "ORD-004", "ORD-005"]);
}

// ==========================================
// 第四部分：聚合与无副作用
// ==========================================

#[test]
fn test_summarize_counts_and_mode() {
    let engine = QueryEngine::new();
    let summary = engine.summarize(&fixture());

    assert_eq!(summary.order_count, 5);
    assert_eq!(summary.expired_count, 1);
    assert_eq!(summary.critical_count, 1);
    assert_eq!(summary.warning_count, 1);
    assert_eq!(summary.safe_count, 2);
    assert_eq!(summary.unknown_count, 1);
    assert_eq!(summary.total_value, 5_200_000.0);
    // +∞ 不计入均值: (0 + 0.5 + 6 + 20) / 4
    assert!((summary.avg_time_remaining - 6.625).abs() < 1e-9);
    // 平台并列 (shopee ×2 为众数), 承运商 Viettel Post ×3
    assert_eq!(summary.top_platform, "shopee");
    assert_eq!(summary.top_carrier, "Viettel Post");
}

#[test]
fn test_apply_does_not_mutate_input() {
    let engine = QueryEngine::new();
    let orders = fixture();
    let snapshot = orders.clone();

    let filter = FilterSpec {
        platform: Some("tiktok".to_string()),
        ..FilterSpec::default()
    };
    let sort = SortSpec::new(SortField::OrderValue, SortDirection::Desc);
    let _ = engine.apply(&orders, &filter, Some(&sort));
    let _ = engine.apply(&orders, &FilterSpec::any(), None);

    assert_eq!(orders.len(), snapshot.len());
    for (a, b) in orders.iter().zip(snapshot.iter()) {
        assert_eq!(a.order_id, b.order_id);
        assert_eq!(a.order_value, b.order_value);
        assert_eq!(a.status, b.status);
    }
}
