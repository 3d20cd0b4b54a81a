// ==========================================
// 门店排班系统 - 合成数据生成
// ==========================================
// 用途: 演示与种子数据;无外部 POS 时的内存变体数据源
// 约定: 全部基于索引取模的确定性变化,不引入随机数
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::transaction::Transaction;
use crate::domain::types::{AvailabilityClass, ShiftPreference};
use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

// 典型客流模式 (每小时订单数,早班 8 小时 + 晚班 8 小时)
const WEEKDAY_MORNING: [u32; 8] = [5, 8, 12, 15, 20, 18, 14, 10];
const WEEKDAY_EVENING: [u32; 8] = [25, 30, 35, 28, 20, 15, 10, 8];
const WEEKEND_MORNING: [u32; 8] = [15, 20, 25, 30, 35, 32, 28, 22];
const WEEKEND_EVENING: [u32; 8] = [40, 45, 42, 38, 30, 25, 18, 12];

// 员工姓名池
const FIRST_NAMES: [&str; 10] = [
    "Alex", "Jordan", "Taylor", "Morgan", "Casey", "Riley", "Quinn", "Avery", "Sage", "Dakota",
];
const LAST_NAMES: [&str; 10] = [
    "Chen", "Patel", "Kim", "Martinez", "Johnson", "Lee", "Wong", "Garcia", "Singh", "Brown",
];

/// 类似天气扰动的确定性变化因子,范围 [0.7, 1.3]
fn variation(week: usize, day: usize, hour: usize) -> f64 {
    let seed = (week * 31 + day * 7 + hour * 3) % 13;
    0.7 + 0.6 * (seed as f64 / 12.0)
}

/// 生成合成 POS 流水
///
/// 按周×天×小时展开典型客流模式,乘以确定性扰动;
/// 同样的 (weeks, end) 输入恒定产出同样的流水
///
/// # 参数
/// - weeks: 回溯周数
/// - end: 数据截止时刻 (通常为当前时间)
///
/// # 返回
/// 流水列表 (按时间升序)
pub fn generate_transactions(weeks: usize, end: DateTime<Utc>) -> Vec<Transaction> {
    let start = end - Duration::weeks(weeks as i64);
    // 对齐到当天 0 点,保证小时展开不跨日
    let start = start
        .with_hour(0)
        .and_then(|t| t.with_minute(0))
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(start);

    let mut transactions = Vec::new();
    let mut order_id: i64 = 1;

    for week in 0..weeks {
        for day in 0..7 {
            let current = start + Duration::weeks(week as i64) + Duration::days(day as i64);
            // 按实际日历星期判断周末
            let is_weekend = matches!(
                current.date_naive().weekday(),
                chrono::Weekday::Sat | chrono::Weekday::Sun
            );

            let (morning, evening) = if is_weekend {
                (WEEKEND_MORNING, WEEKEND_EVENING)
            } else {
                (WEEKDAY_MORNING, WEEKDAY_EVENING)
            };

            for (offset, base) in morning.iter().enumerate() {
                let hour = 8 + offset as u32;
                let orders = (*base as f64 * variation(week, day, offset)) as u32;
                for _ in 0..orders {
                    transactions.push(create_transaction(order_id, current, hour));
                    order_id += 1;
                }
            }

            for (offset, base) in evening.iter().enumerate() {
                let hour = 16 + offset as u32;
                let orders = (*base as f64 * variation(week, day, offset + 8)) as u32;
                for _ in 0..orders {
                    transactions.push(create_transaction(order_id, current, hour));
                    order_id += 1;
                }
            }
        }
    }

    transactions
}

fn create_transaction(order_id: i64, day_start: DateTime<Utc>, hour: u32) -> Transaction {
    let minute = ((order_id * 7) % 60) as i64;
    Transaction {
        order_id,
        timestamp: day_start + Duration::hours(hour as i64) + Duration::minutes(minute),
        item_count: 1 + (order_id % 4) as i32,
        prep_time_minutes: 3 + (order_id % 6) as i32,
    }
}

/// 生成合成员工数据
///
/// 可用性与偏好按索引取模展开,覆盖全部组合
///
/// # 参数
/// - count: 员工数量 (超过姓名池大小时复用姓名并追加序号)
pub fn generate_employees(count: usize) -> Vec<Employee> {
    (0..count)
        .map(|i| {
            let name = if i < FIRST_NAMES.len() {
                format!("{} {}", FIRST_NAMES[i], LAST_NAMES[i])
            } else {
                format!(
                    "{} {} {}",
                    FIRST_NAMES[i % FIRST_NAMES.len()],
                    LAST_NAMES[i % LAST_NAMES.len()],
                    i + 1
                )
            };

            // 多数员工全周可用,少数只排工作日/周末
            let availability = match i % 5 {
                1 => AvailabilityClass::WeekdayOnly,
                3 => AvailabilityClass::WeekendOnly,
                _ => AvailabilityClass::All,
            };

            let shift_preference = match i % 3 {
                0 => ShiftPreference::Morning,
                1 => ShiftPreference::Evening,
                _ => ShiftPreference::NoPreference,
            };

            Employee {
                employee_id: (i + 1) as i64,
                name,
                availability,
                shift_preference,
                max_hours_per_week: 40.0,
            }
        })
        .collect()
}
