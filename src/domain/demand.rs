// ==========================================
// 门店排班系统 - 需求估计与预测信号
// ==========================================
// 职责: 承载一次编排运行内的派生数据
// 红线: 派生数据不落库,每次运行重算
// ==========================================

use crate::domain::types::ForecastSource;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// ==========================================
// DemandEstimate - 历史需求估计
// ==========================================
// 结构: 星期名 -> 班次名 -> 平均每小时订单数
// 零流水的桶不存在（缺键由调用方按默认均值兜底）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandEstimate {
    buckets: HashMap<String, HashMap<String, f64>>,
}

impl DemandEstimate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入一个 (星期, 班次) 桶的估计值
    pub fn insert(&mut self, day: &str, shift: &str, orders_per_hour: f64) {
        self.buckets
            .entry(day.to_string())
            .or_default()
            .insert(shift.to_string(), orders_per_hour);
    }

    /// 查询 (星期, 班次) 桶
    ///
    /// # 返回
    /// - Some(f64): 窗口内存在流水
    /// - None: 桶缺失（不是 0）
    pub fn get(&self, day: &str, shift: &str) -> Option<f64> {
        self.buckets.get(day).and_then(|shifts| shifts.get(shift)).copied()
    }

    /// 桶数量（用于日志与统计）
    pub fn bucket_count(&self) -> usize {
        self.buckets.values().map(|s| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// 导出为 JSON 值（供评论生成协作方使用）
    ///
    /// 星期与班次按字典序输出，保证同一输入产出相同文本
    pub fn to_json(&self) -> serde_json::Value {
        let ordered: BTreeMap<&str, BTreeMap<&str, f64>> = self
            .buckets
            .iter()
            .map(|(day, shifts)| {
                (
                    day.as_str(),
                    shifts.iter().map(|(k, v)| (k.as_str(), *v)).collect(),
                )
            })
            .collect();
        serde_json::json!(ordered)
    }
}

// ==========================================
// ForecastSignal - 外部预测信号
// ==========================================
// 每个日历日一个乘数;核心不抓取也不解析外部数据
// BTreeMap: 迭代/序列化按日期有序,保证确定性
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSignal {
    multipliers: BTreeMap<NaiveDate, f64>,
    pub source: ForecastSource,
}

impl ForecastSignal {
    pub fn new(multipliers: BTreeMap<NaiveDate, f64>, source: ForecastSource) -> Self {
        Self { multipliers, source }
    }

    /// 中性基线信号: 给定日期范围内每天乘数均为 default_multiplier
    pub fn baseline(dates: &[NaiveDate], default_multiplier: f64) -> Self {
        let multipliers = dates.iter().map(|d| (*d, default_multiplier)).collect();
        Self {
            multipliers,
            source: ForecastSource::Baseline,
        }
    }

    /// 查询指定日期的乘数
    ///
    /// # 返回
    /// - Some(f64): 信号覆盖该日期
    /// - None: 未覆盖（调用方按默认乘数兜底）
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.multipliers.get(&date).copied()
    }

    /// 覆盖的日期数
    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }

    /// 按日期序迭代 (日期, 乘数)
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &f64)> {
        self.multipliers.iter()
    }

    /// 导出为 JSON 值（供评论生成协作方使用）
    pub fn to_json(&self) -> serde_json::Value {
        let ordered: BTreeMap<String, f64> = self
            .multipliers
            .iter()
            .map(|(d, m)| (d.to_string(), *m))
            .collect();
        serde_json::json!({
            "source": self.source.to_string(),
            "multipliers": ordered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_bucket_is_absent_not_zero() {
        let mut estimate = DemandEstimate::new();
        estimate.insert("Monday", "morning", 12.5);

        assert_eq!(estimate.get("Monday", "morning"), Some(12.5));
        // 缺失的桶返回 None,而不是 0
        assert_eq!(estimate.get("Monday", "evening"), None);
        assert_eq!(estimate.get("Tuesday", "morning"), None);
    }

    #[test]
    fn test_baseline_signal_covers_all_dates() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 11).unwrap(),
        ];
        let signal = ForecastSignal::baseline(&dates, 1.0);

        assert_eq!(signal.source, ForecastSource::Baseline);
        assert_eq!(signal.len(), 2);
        for date in &dates {
            assert_eq!(signal.get(*date), Some(1.0));
        }
        assert_eq!(signal.get(NaiveDate::from_ymd_opt(2026, 8, 12).unwrap()), None);
    }
}
