// ==========================================
// 门店排班系统 - 领域类型定义
// ==========================================

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 可用性类别 (Availability Class)
// ==========================================
// 员工主数据字段,决定其能否出现在某一天的候选列表中
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityClass {
    All,         // 全周可用
    WeekdayOnly, // 仅工作日
    WeekendOnly, // 仅周末
}

impl fmt::Display for AvailabilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityClass::All => write!(f, "ALL"),
            AvailabilityClass::WeekdayOnly => write!(f, "WEEKDAY_ONLY"),
            AvailabilityClass::WeekendOnly => write!(f, "WEEKEND_ONLY"),
        }
    }
}

impl AvailabilityClass {
    /// 从数据库字符串解析可用性类别
    ///
    /// 未知取值按 ALL 处理（宁可多给候选，也不静默排除员工）
    pub fn from_db_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "WEEKDAY_ONLY" => AvailabilityClass::WeekdayOnly,
            "WEEKEND_ONLY" => AvailabilityClass::WeekendOnly,
            _ => AvailabilityClass::All,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AvailabilityClass::All => "ALL",
            AvailabilityClass::WeekdayOnly => "WEEKDAY_ONLY",
            AvailabilityClass::WeekendOnly => "WEEKEND_ONLY",
        }
    }
}

// ==========================================
// 班次偏好 (Shift Preference)
// ==========================================
// 红线: 偏好只影响排序,不构成硬约束
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftPreference {
    Morning,      // 偏好早班
    Evening,      // 偏好晚班
    NoPreference, // 无偏好
}

impl fmt::Display for ShiftPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftPreference::Morning => write!(f, "MORNING"),
            ShiftPreference::Evening => write!(f, "EVENING"),
            ShiftPreference::NoPreference => write!(f, "NO_PREFERENCE"),
        }
    }
}

impl ShiftPreference {
    /// 从数据库字符串解析班次偏好
    pub fn from_db_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "MORNING" => ShiftPreference::Morning,
            "EVENING" => ShiftPreference::Evening,
            _ => ShiftPreference::NoPreference,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ShiftPreference::Morning => "MORNING",
            ShiftPreference::Evening => "EVENING",
            ShiftPreference::NoPreference => "NO_PREFERENCE",
        }
    }

    /// 是否与指定班次名匹配
    ///
    /// # 参数
    /// - shift_name: 班次名（"morning" / "evening"）
    pub fn matches(&self, shift_name: &str) -> bool {
        match self {
            ShiftPreference::Morning => shift_name.eq_ignore_ascii_case("morning"),
            ShiftPreference::Evening => shift_name.eq_ignore_ascii_case("evening"),
            ShiftPreference::NoPreference => false,
        }
    }
}

// ==========================================
// 预测信号来源 (Forecast Source)
// ==========================================
// 标识预测信号由外部交互产生还是基线兜底产生
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForecastSource {
    Exchange, // 外部文本生成交互产出
    Baseline, // 兜底中性信号 (乘数全部为默认值)
}

impl fmt::Display for ForecastSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastSource::Exchange => write!(f, "EXCHANGE"),
            ForecastSource::Baseline => write!(f, "BASELINE"),
        }
    }
}

// ==========================================
// 日期辅助函数
// ==========================================

/// 返回日期对应的英文星期名（与历史数据的分桶键一致）
pub fn day_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// 判断星期名是否属于周末
pub fn is_weekend(day: &str) -> bool {
    day == "Saturday" || day == "Sunday"
}
