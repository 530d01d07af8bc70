// ==========================================
// 电商仓储发货运营系统 - 时间源
// ==========================================
// 职责: 把"当前时刻"收敛为唯一注入点
// 红线: 各判定引擎全部显式接收 now 参数;
//       只有刷新器边界允许持有时间源取墙钟
// ==========================================

use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// 当前时刻提供者
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

// ==========================================
// SystemClock - 生产用墙钟
// ==========================================
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// ==========================================
// ManualClock - 测试用可拨动时钟
// ==========================================
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// 拨动时钟到指定时刻
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    /// 前进指定时长
    pub fn advance(&self, duration: chrono::Duration) {
        let mut guard = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *guard += duration;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}
