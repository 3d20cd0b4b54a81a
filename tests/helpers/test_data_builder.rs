// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================
// 各测试 crate 独立编译,允许部分辅助函数未被使用
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use store_roster_aps::domain::employee::Employee;
use store_roster_aps::domain::transaction::Transaction;
use store_roster_aps::domain::types::{AvailabilityClass, ShiftPreference};

// ==========================================
// Employee 构建器
// ==========================================

pub struct EmployeeBuilder {
    employee_id: i64,
    name: String,
    availability: AvailabilityClass,
    shift_preference: ShiftPreference,
    max_hours_per_week: f64,
}

impl EmployeeBuilder {
    pub fn new(employee_id: i64, name: &str) -> Self {
        Self {
            employee_id,
            name: name.to_string(),
            availability: AvailabilityClass::All,
            shift_preference: ShiftPreference::NoPreference,
            max_hours_per_week: 40.0,
        }
    }

    pub fn availability(mut self, availability: AvailabilityClass) -> Self {
        self.availability = availability;
        self
    }

    pub fn preference(mut self, preference: ShiftPreference) -> Self {
        self.shift_preference = preference;
        self
    }

    pub fn max_hours(mut self, hours: f64) -> Self {
        self.max_hours_per_week = hours;
        self
    }

    pub fn build(self) -> Employee {
        Employee {
            employee_id: self.employee_id,
            name: self.name,
            availability: self.availability,
            shift_preference: self.shift_preference,
            max_hours_per_week: self.max_hours_per_week,
        }
    }
}

// ==========================================
// Transaction 辅助函数
// ==========================================

/// 创建指定时刻的流水
pub fn create_transaction(order_id: i64, y: i32, m: u32, d: u32, hour: u32) -> Transaction {
    Transaction {
        order_id,
        timestamp: Utc.with_ymd_and_hms(y, m, d, hour, 15, 0).unwrap(),
        item_count: 2,
        prep_time_minutes: 5,
    }
}

/// 测试基准时间: 2026-08-07 12:00 UTC (周五)
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
}
