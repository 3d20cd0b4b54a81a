// ==========================================
// 门店排班系统 - 排班配置值
// ==========================================
// 职责: 承载一次管线构造所需的全部配置
// 红线: 不使用进程级全局常量,配置显式传入管线
// ==========================================

use crate::domain::shift::ShiftCatalog;
use serde::{Deserialize, Serialize};

// ==========================================
// RosterConfig - 排班配置
// ==========================================
// 同一进程可并存多份配置（测试/多门店）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    // ===== 班次目录 =====
    pub shift_catalog: ShiftCatalog,

    // ===== 人数换算 =====
    pub min_staff_per_shift: i32,      // 每班最低人数
    pub orders_per_staff_ratio: f64,   // 每名员工每小时可承接订单数

    // ===== 需求估计 =====
    pub demand_window_days: i64,           // 历史流水回溯窗口 (天)
    pub default_avg_orders_per_hour: f64,  // 桶缺失时的默认均值
    pub fetch_limit: usize,                // 流水拉取上限

    // ===== 计划窗口 =====
    pub horizon_days: i64,          // 计划窗口长度 (天)
    pub horizon_offset_days: i64,   // 窗口起点相对今天的偏移 (1 = 明天起)

    // ===== 预测交互 =====
    pub default_multiplier: f64,     // 信号未覆盖日期的默认乘数
    pub forecast_max_rounds: u32,    // 预测交互轮数上限
    pub forecast_timeout_secs: u64,  // 预测阶段超时 (唯一允许超时的阶段)
    pub location: String,            // 门店所在地 (预测查询用)
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            shift_catalog: ShiftCatalog::standard(),
            min_staff_per_shift: 2,
            orders_per_staff_ratio: 15.0,
            demand_window_days: 28,
            default_avg_orders_per_hour: 20.0,
            fetch_limit: 50_000,
            horizon_days: 7,
            horizon_offset_days: 1,
            default_multiplier: 1.0,
            forecast_max_rounds: 3,
            forecast_timeout_secs: 30,
            location: "San Diego, CA".to_string(),
        }
    }
}
