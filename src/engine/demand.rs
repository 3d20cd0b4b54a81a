// ==========================================
// 门店排班系统 - 需求聚合引擎
// ==========================================
// 职责: 历史 POS 流水 -> 按 (星期, 班次) 的平均订单率
// 输入: 流水快照 + 回溯窗口 + 注入的当前时间
// 输出: DemandEstimate (零流水的桶缺失,不为 0)
// ==========================================

use crate::domain::demand::DemandEstimate;
use crate::domain::shift::{ShiftCatalog, ShiftWindow};
use crate::domain::transaction::Transaction;
use crate::domain::types::day_name;
use chrono::{DateTime, Duration, Timelike, Utc};
use std::collections::HashMap;
use tracing::debug;

// ==========================================
// DemandAggregator - 需求聚合引擎
// ==========================================
pub struct DemandAggregator {
    // 无状态引擎,不需要注入依赖
}

impl DemandAggregator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 聚合历史流水为需求估计
    ///
    /// 规则:
    /// 1) 只保留 timestamp >= now - window_days 的流水
    /// 2) 按 (星期名, 覆盖其小时数的班次) 分桶;
    ///    不落在任何班次窗口内的流水静默丢弃
    /// 3) 桶估计值 = 桶内流水数 / 班次时长
    ///
    /// 纯函数: 当前时间由调用方注入,便于测试
    ///
    /// # 参数
    /// - transactions: 流水快照
    /// - catalog: 班次目录
    /// - window_days: 回溯窗口 (天)
    /// - now: 当前时间
    ///
    /// # 返回
    /// 需求估计（窗口内无流水的桶不存在）
    pub fn aggregate(
        &self,
        transactions: &[Transaction],
        catalog: &ShiftCatalog,
        window_days: i64,
        now: DateTime<Utc>,
    ) -> DemandEstimate {
        let cutoff = now - Duration::days(window_days);

        // (星期, 班次) -> 流水计数
        let mut counts: HashMap<(String, String), u64> = HashMap::new();
        let mut dropped = 0usize;

        for tx in transactions {
            if tx.timestamp < cutoff {
                continue;
            }

            let hour = tx.timestamp.hour();
            match catalog.shift_for_hour(hour) {
                Some(shift) => {
                    let day = day_name(tx.timestamp.date_naive());
                    *counts
                        .entry((day.to_string(), shift.name.clone()))
                        .or_insert(0) += 1;
                }
                None => {
                    // 营业窗口之外 (如凌晨清洁时段的测试单)
                    dropped += 1;
                }
            }
        }

        let mut estimate = DemandEstimate::new();
        for ((day, shift_name), count) in counts {
            let duration = catalog
                .find(&shift_name)
                .map(|s| s.duration_hours())
                .unwrap_or(1.0);
            estimate.insert(&day, &shift_name, count as f64 / duration);
        }

        debug!(
            bucket_count = estimate.bucket_count(),
            dropped_count = dropped,
            window_days,
            "需求聚合完成"
        );

        estimate
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for DemandAggregator {
    fn default() -> Self {
        Self::new()
    }
}
