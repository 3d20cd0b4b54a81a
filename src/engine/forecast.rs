// ==========================================
// 门店排班系统 - 预测调整引擎
// ==========================================
// 职责: 基线需求 × 外部预测乘数 -> 调整后订单率
// 红线: 不做截断;极端乘数原样放大需求,由经营者看到原始信号
// ==========================================

use crate::config::RosterConfig;
use crate::domain::demand::{DemandEstimate, ForecastSignal};
use chrono::NaiveDate;

// ==========================================
// ForecastAdjuster - 预测调整引擎
// ==========================================
pub struct ForecastAdjuster {
    // 无状态引擎,不需要注入依赖
}

impl ForecastAdjuster {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 计算某 (日期, 星期, 班次) 的调整后订单率
    ///
    /// 规则:
    /// - 基线 = 估计桶值,桶缺失时取 default_avg_orders_per_hour
    /// - 乘数 = 信号覆盖值,未覆盖时取 default_multiplier
    /// - 结果 = 基线 × 乘数,不设上限
    ///
    /// # 参数
    /// - estimate: 需求估计
    /// - day: 星期名
    /// - shift_name: 班次名
    /// - date: 日历日
    /// - signal: 预测信号
    /// - config: 排班配置
    ///
    /// # 返回
    /// 调整后的平均每小时订单数
    pub fn adjust(
        &self,
        estimate: &DemandEstimate,
        day: &str,
        shift_name: &str,
        date: NaiveDate,
        signal: &ForecastSignal,
        config: &RosterConfig,
    ) -> f64 {
        let base = estimate
            .get(day, shift_name)
            .unwrap_or(config.default_avg_orders_per_hour);
        let multiplier = signal.get(date).unwrap_or(config.default_multiplier);

        base * multiplier
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for ForecastAdjuster {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ForecastSource;
    use std::collections::BTreeMap;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 10).unwrap()
    }

    fn signal_with(date: NaiveDate, multiplier: f64) -> ForecastSignal {
        let mut m = BTreeMap::new();
        m.insert(date, multiplier);
        ForecastSignal::new(m, ForecastSource::Exchange)
    }

    #[test]
    fn test_base_times_multiplier() {
        let adjuster = ForecastAdjuster::new();
        let config = RosterConfig::default();
        let mut estimate = DemandEstimate::new();
        estimate.insert("Monday", "morning", 30.0);

        let adjusted = adjuster.adjust(
            &estimate,
            "Monday",
            "morning",
            test_date(),
            &signal_with(test_date(), 0.7),
            &config,
        );
        assert!((adjusted - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_bucket_uses_default_average() {
        // 测试: 桶缺失 => 默认均值 20,而不是 0 或报错
        let adjuster = ForecastAdjuster::new();
        let config = RosterConfig::default();
        let estimate = DemandEstimate::new();

        let adjusted = adjuster.adjust(
            &estimate,
            "Sunday",
            "evening",
            test_date(),
            &signal_with(test_date(), 1.1),
            &config,
        );
        assert!((adjusted - 22.0).abs() < 1e-9);
    }

    #[test]
    fn test_uncovered_date_uses_default_multiplier() {
        // 测试: 信号未覆盖的日期 => 默认乘数 1.0
        let adjuster = ForecastAdjuster::new();
        let config = RosterConfig::default();
        let mut estimate = DemandEstimate::new();
        estimate.insert("Monday", "morning", 18.0);

        let other_date = NaiveDate::from_ymd_opt(2026, 8, 11).unwrap();
        let adjusted = adjuster.adjust(
            &estimate,
            "Monday",
            "morning",
            other_date,
            &signal_with(test_date(), 0.5),
            &config,
        );
        assert!((adjusted - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_clamping_of_pathological_multiplier() {
        // 测试: 极端乘数不截断
        let adjuster = ForecastAdjuster::new();
        let config = RosterConfig::default();
        let mut estimate = DemandEstimate::new();
        estimate.insert("Monday", "morning", 20.0);

        let adjusted = adjuster.adjust(
            &estimate,
            "Monday",
            "morning",
            test_date(),
            &signal_with(test_date(), 1000.0),
            &config,
        );
        assert_eq!(adjusted, 20_000.0);
    }
}
