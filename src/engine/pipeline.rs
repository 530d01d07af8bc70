// ==========================================
// 电商仓储发货运营系统 - 订单处理流水线
// ==========================================
// 职责: 批量编排 清洗 → 去重 → 承运商推荐 → 派生状态重算
// 输出: 富化订单集 (按剩余时间升序) + 数据质量摘要
// 红线: 清洗失败不丢数据不报异常,一律计入质量摘要
// ==========================================

use crate::config::policy_matrix::PolicyMatrix;
use crate::domain::order::{Order, QualitySummary, RawOrderRecord};
use crate::engine::carrier::CarrierSuggester;
use crate::engine::derivation::derive_order_state;
use crate::engine::normalizer::OrderNormalizer;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::instrument;
use uuid::Uuid;

/// 流水线批处理结果
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// 批次 ID（追踪日志与后续操作关联用）
    pub batch_id: String,
    /// 富化订单集,按剩余小时数升序（政策缺项 +∞ 沉底）
    pub orders: Vec<Order>,
    pub quality: QualitySummary,
}

// ==========================================
// OrderPipeline - 订单处理流水线
// ==========================================
pub struct OrderPipeline {
    normalizer: OrderNormalizer,
    suggester: CarrierSuggester,
}

impl OrderPipeline {
    pub fn new() -> Self {
        Self {
            normalizer: OrderNormalizer::new(),
            suggester: CarrierSuggester::new(),
        }
    }

    /// 批量处理原始订单记录
    ///
    /// 逐条: 清洗 → 批内订单号去重 (保留首见) → 承运商推荐 → 派生状态重算
    ///
    /// 质量摘要不变量: clean + errors + duplicates == total;
    /// needed_cleaning 为 clean 中经过回退修复的子集
    #[instrument(skip(self, raw_records, matrix), fields(count = raw_records.len()))]
    pub fn process(
        &self,
        raw_records: &[RawOrderRecord],
        matrix: &PolicyMatrix,
        now: DateTime<Utc>,
    ) -> PipelineOutcome {
        let batch_id = Uuid::new_v4().to_string();
        let mut quality = QualitySummary {
            total: raw_records.len(),
            ..QualitySummary::default()
        };

        let mut seen_ids: HashSet<String> = HashSet::with_capacity(raw_records.len());
        let mut orders: Vec<Order> = Vec::with_capacity(raw_records.len());

        for (index, raw) in raw_records.iter().enumerate() {
            let row = index + 1;

            let normalized = match self.normalizer.normalize(raw, row, now) {
                Ok(normalized) => normalized,
                Err(e) => {
                    quality.errors += 1;
                    tracing::warn!("记录清洗失败,已剔除: {}", e);
                    continue;
                }
            };

            // 批内订单号去重: 保留首见记录
            if !seen_ids.insert(normalized.order.order_id.clone()) {
                quality.duplicates += 1;
                tracing::warn!(
                    "重复订单号,已剔除 (行 {}): {}",
                    row,
                    normalized.order.order_id
                );
                continue;
            }

            quality.clean += 1;
            if normalized.needed_cleaning {
                quality.needed_cleaning += 1;
            }

            let mut order = normalized.order;
            order.suggested_carrier = self
                .suggester
                .suggest(&order.platform, order.order_value)
                .to_string();
            order.apply_derived(derive_order_state(&order, matrix, now));

            orders.push(order);
        }

        // 规范输出顺序: 剩余时间升序 (与查询引擎的排序无关)
        orders.sort_by(|a, b| {
            nan_as_zero(a.time_remaining_hours).total_cmp(&nan_as_zero(b.time_remaining_hours))
        });

        tracing::info!(
            "批次处理完成: batch_id={}, total={}, clean={}, needed_cleaning={}, errors={}, duplicates={}",
            batch_id,
            quality.total,
            quality.clean,
            quality.needed_cleaning,
            quality.errors,
            quality.duplicates
        );

        PipelineOutcome {
            batch_id,
            orders,
            quality,
        }
    }
}

impl Default for OrderPipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn nan_as_zero(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v
    }
}
