// ==========================================
// 电商仓储发货运营系统 - 实时刷新器
// ==========================================
// 职责: 定时对同一订单集就地重算派生状态 (墙钟推进即语义变化)
// 红线: 单实例单定时器; cancel 幂等且确定性阻止后续拍;
//       每一拍在锁内完成全量重算后才对外回调,
//       外部读取只会看到拍前或拍后状态
// ==========================================

use crate::config::policy_matrix::PolicyMatrix;
use crate::domain::order::{AggregateSummary, Order};
use crate::engine::clock::{Clock, SystemClock};
use crate::engine::derivation::derive_order_state;
use crate::engine::query::QueryEngine;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use thiserror::Error;
use tokio::task::AbortHandle;
use tokio::time::MissedTickBehavior;

/// 刷新器与外部共享的订单集
pub type SharedOrders = Arc<RwLock<Vec<Order>>>;

// ==========================================
// 刷新器错误
// ==========================================
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefreshError {
    #[error("刷新器已在运行,同一实例禁止并发启动")]
    AlreadyRunning,

    #[error("刷新间隔必须大于 0")]
    InvalidInterval,
}

// ==========================================
// RefreshHandle - 取消句柄
// ==========================================
pub struct RefreshHandle {
    cancelled: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
    abort: AbortHandle,
}

impl RefreshHandle {
    /// 取消刷新（幂等,可重复调用）
    ///
    /// 返回后不会再有任何一拍执行,包括已排定未触发的那一拍;
    /// 正在执行中的一拍会完整结束（重算过程不含挂起点）
    pub fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        self.abort.abort();
        self.running.store(false, Ordering::SeqCst);
        tracing::info!("实时刷新已取消");
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

// ==========================================
// RealtimeRefresher - 实时刷新器
// ==========================================
pub struct RealtimeRefresher {
    clock: Arc<dyn Clock>,
    running: Arc<AtomicBool>,
}

impl RealtimeRefresher {
    /// 生产用刷新器（墙钟）
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// 注入自定义时间源（测试用可拨动时钟）
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// 启动定时刷新
    ///
    /// 每一拍: 取当前时刻 → 写锁内对每个订单整体替换
    /// {sla_status, time_remaining_hours, priority} → 释放锁后
    /// 以 (订单快照, 聚合摘要, 时刻) 回调 on_tick。
    /// 首拍在启动后立即执行,此后按 interval 周期触发。
    ///
    /// # 返回
    /// - Ok(RefreshHandle): 取消句柄
    /// - Err(AlreadyRunning): 同一刷新器已有定时器在跑
    /// - Err(InvalidInterval): 间隔为 0
    pub fn start<F>(
        &self,
        orders: SharedOrders,
        matrix: Arc<PolicyMatrix>,
        interval: Duration,
        on_tick: F,
    ) -> Result<RefreshHandle, RefreshError>
    where
        F: Fn(&[Order], &AggregateSummary, DateTime<Utc>) + Send + Sync + 'static,
    {
        if interval.is_zero() {
            return Err(RefreshError::InvalidInterval);
        }
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(RefreshError::AlreadyRunning);
        }

        let cancelled = Arc::new(AtomicBool::new(false));
        let clock = Arc::clone(&self.clock);
        let running = Arc::clone(&self.running);
        let task_cancelled = Arc::clone(&cancelled);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if task_cancelled.load(Ordering::SeqCst) {
                    break;
                }

                let now = clock.now();
                let (snapshot, summary) = {
                    let mut guard = orders.write().unwrap_or_else(|e| e.into_inner());
                    for order in guard.iter_mut() {
                        // 政策缺项走 Unknown 路径,重算对规范订单永不失败
                        order.apply_derived(derive_order_state(order, &matrix, now));
                    }
                    let summary = QueryEngine::new().summarize(&guard);
                    (guard.clone(), summary)
                };

                // 重算期间被取消的拍不再对外回调
                if task_cancelled.load(Ordering::SeqCst) {
                    break;
                }
                on_tick(&snapshot, &summary, now);
            }

            running.store(false, Ordering::SeqCst);
        });

        tracing::info!("实时刷新已启动: interval={:?}", interval);

        Ok(RefreshHandle {
            cancelled,
            running: Arc::clone(&self.running),
            abort: handle.abort_handle(),
        })
    }
}

impl Default for RealtimeRefresher {
    fn default() -> Self {
        Self::new()
    }
}
