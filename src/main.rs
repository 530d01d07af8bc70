// ==========================================
// 电商仓储发货运营系统 - 控制台入口
// ==========================================
// 职责: 演示数据 → 流水线 → 聚合摘要 → 实时刷新 (Ctrl-C 退出)
// ==========================================

use shipping_ops::engine::refresher::SharedOrders;
use shipping_ops::importer::generate_demo_orders;
use shipping_ops::{
    logging, OrderPipeline, PolicyMatrix, QueryEngine, RealtimeRefresher,
};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// 演示批次大小
const DEMO_ORDER_COUNT: usize = 50;

/// 实时刷新间隔
const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", shipping_ops::APP_NAME);
    tracing::info!("系统版本: {}", shipping_ops::VERSION);
    tracing::info!("==================================================");

    // 政策矩阵: 优先用户配置,缺省回落内置矩阵
    let matrix = Arc::new(PolicyMatrix::load_or_default());
    tracing::info!("政策矩阵已就绪: {} 条", matrix.len());

    // 生成演示批次并跑流水线
    let now = chrono::Utc::now();
    let raw_records = generate_demo_orders(DEMO_ORDER_COUNT, now);

    let pipeline = OrderPipeline::new();
    let outcome = pipeline.process(&raw_records, &matrix, now);

    tracing::info!(
        "批次 {} 处理完成: {} 条订单入队",
        outcome.batch_id,
        outcome.orders.len()
    );

    // 队首最紧急的订单
    for order in outcome.orders.iter().take(5) {
        tracing::info!(
            "  {} | {} | {} | 剩余 {:.1}h | {} | 优先分 {:.1}",
            order.order_id,
            order.platform,
            order.suggested_carrier,
            order.time_remaining_hours,
            order.sla_status.level,
            order.priority
        );
    }

    let query = QueryEngine::new();
    let summary = query.summarize(&outcome.orders);
    tracing::info!(
        "聚合摘要: 超时 {} / 临近 {} / 安全 {} / 缺项 {}, 总金额 {:.0}, 主力平台 {}",
        summary.expired_count,
        summary.warning_count,
        summary.safe_count,
        summary.unknown_count,
        summary.total_value,
        summary.top_platform
    );

    // 启动实时刷新,Ctrl-C 退出
    let shared: SharedOrders = Arc::new(RwLock::new(outcome.orders));
    let refresher = RealtimeRefresher::new();
    let handle = refresher.start(
        Arc::clone(&shared),
        Arc::clone(&matrix),
        REFRESH_INTERVAL,
        |orders, summary, at| {
            tracing::info!(
                "刷新拍 @ {}: {} 条订单, 超时 {} / 临近 {}",
                at.to_rfc3339(),
                orders.len(),
                summary.expired_count,
                summary.warning_count
            );
        },
    )?;

    tracing::info!("实时刷新运行中 (间隔 {:?}), Ctrl-C 退出", REFRESH_INTERVAL);
    tokio::signal::ctrl_c().await?;

    handle.cancel();
    tracing::info!("已退出");

    Ok(())
}
