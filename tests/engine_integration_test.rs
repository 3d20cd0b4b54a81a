// ==========================================
// 引擎间集成测试
// ==========================================
// 职责: 验证 需求聚合 -> 预测调整 -> 班次分配 的协作与数据流转
// ==========================================

mod helpers;

use chrono::{Datelike, Duration, NaiveDate};
use helpers::test_data_builder::{create_transaction, test_now, EmployeeBuilder};
use std::collections::HashMap;
use store_roster_aps::config::RosterConfig;
use store_roster_aps::domain::demand::ForecastSignal;
use store_roster_aps::domain::shift::ShiftWindow;
use store_roster_aps::domain::types::AvailabilityClass;
use store_roster_aps::engine::{DemandAggregator, ShiftAssigner};
use store_roster_aps::generator;

/// 计划窗口: 2026-08-10 (周一) 起 7 天
fn planning_dates() -> Vec<NaiveDate> {
    (0..7)
        .map(|i| NaiveDate::from_ymd_opt(2026, 8, 10).unwrap() + Duration::days(i))
        .collect()
}

#[test]
fn test_aggregate_then_assign_full_flow() {
    // 测试: 合成流水聚合后直接驱动分配,产出完整排班表
    let config = RosterConfig::default();
    let aggregator = DemandAggregator::new();
    let assigner = ShiftAssigner::new();

    let transactions = generator::generate_transactions(8, test_now());
    let employees = generator::generate_employees(10);
    let dates = planning_dates();

    let estimate = aggregator.aggregate(
        &transactions,
        &config.shift_catalog,
        config.demand_window_days,
        test_now(),
    );
    // 8 周数据覆盖全部 7 天 × 2 班次
    assert_eq!(estimate.bucket_count(), 14);

    let signal = ForecastSignal::baseline(&dates, config.default_multiplier);
    let roster = assigner.assign(&estimate, &signal, &dates, &employees, &config);

    // 完整性: 每个 (日期, 班次) 恰好一条
    assert_eq!(roster.len(), dates.len() * config.shift_catalog.len());

    // 人数不变式
    for item in &roster {
        assert!(item.staff_needed >= config.min_staff_per_shift);
        assert!(item.staff_assigned.len() as i32 <= item.staff_needed);
    }
}

#[test]
fn test_weekly_hour_cap_holds_for_every_employee() {
    // 测试: 任意员工在整个窗口内的排班工时不超过其周上限
    let config = RosterConfig::default();
    let assigner = ShiftAssigner::new();
    let aggregator = DemandAggregator::new();

    let transactions = generator::generate_transactions(8, test_now());
    let mut employees = generator::generate_employees(8);
    // 压低部分员工的周上限,制造约束紧张
    employees[0].max_hours_per_week = 8.0;
    employees[1].max_hours_per_week = 16.0;

    let dates = planning_dates();
    let estimate = aggregator.aggregate(
        &transactions,
        &config.shift_catalog,
        config.demand_window_days,
        test_now(),
    );
    let signal = ForecastSignal::baseline(&dates, 1.0);
    let roster = assigner.assign(&estimate, &signal, &dates, &employees, &config);

    let shift_hours: HashMap<String, f64> = config
        .shift_catalog
        .iter()
        .map(|s| (s.name.clone(), s.duration_hours()))
        .collect();

    let mut hours: HashMap<i64, f64> = HashMap::new();
    for item in &roster {
        for emp_ref in &item.staff_assigned {
            *hours.entry(emp_ref.employee_id).or_insert(0.0) += shift_hours[&item.shift];
        }
    }

    for emp in &employees {
        let used = hours.get(&emp.employee_id).copied().unwrap_or(0.0);
        assert!(
            used <= emp.max_hours_per_week,
            "员工 {} 超过周上限: {} > {}",
            emp.employee_id,
            used,
            emp.max_hours_per_week
        );
    }
}

#[test]
fn test_availability_exclusion_holds_in_roster() {
    // 测试: weekday_only 员工绝不出现在周末班次,weekend_only 反之
    let config = RosterConfig::default();
    let assigner = ShiftAssigner::new();

    let employees = vec![
        EmployeeBuilder::new(1, "Weekday")
            .availability(AvailabilityClass::WeekdayOnly)
            .build(),
        EmployeeBuilder::new(2, "Weekend")
            .availability(AvailabilityClass::WeekendOnly)
            .build(),
        EmployeeBuilder::new(3, "Anyone").build(),
    ];

    let dates = planning_dates();
    let estimate = store_roster_aps::domain::demand::DemandEstimate::new();
    let signal = ForecastSignal::baseline(&dates, 1.0);
    let roster = assigner.assign(&estimate, &signal, &dates, &employees, &config);

    for item in &roster {
        let weekend = matches!(
            item.date.weekday(),
            chrono::Weekday::Sat | chrono::Weekday::Sun
        );
        for emp_ref in &item.staff_assigned {
            if weekend {
                assert_ne!(emp_ref.employee_id, 1, "weekday_only 员工排入了周末: {:?}", item);
            } else {
                assert_ne!(emp_ref.employee_id, 2, "weekend_only 员工排入了工作日: {:?}", item);
            }
        }
    }
}

#[test]
fn test_forecast_multiplier_raises_headcount() {
    // 测试: 高乘数日期的需求人数高于基线日期
    let config = RosterConfig::default();
    let aggregator = DemandAggregator::new();
    let assigner = ShiftAssigner::new();

    // 窗口内仅一个周一 (2026-07-13) 有流水: 360 单 / 8 小时 = 45 单/小时
    let mut transactions = Vec::new();
    for i in 0..(45 * 8) {
        transactions.push(create_transaction(i + 1, 2026, 7, 13, 8 + (i % 8) as u32));
    }

    let estimate = aggregator.aggregate(
        &transactions,
        &config.shift_catalog,
        config.demand_window_days,
        test_now(),
    );
    let monday_rate = estimate.get("Monday", "morning").unwrap();
    assert!((monday_rate - 45.0).abs() < 1e-9);

    let dates = vec![NaiveDate::from_ymd_opt(2026, 8, 10).unwrap()]; // 周一
    let employees = generator::generate_employees(10);

    let baseline = ForecastSignal::baseline(&dates, 1.0);
    let doubled = ForecastSignal::baseline(&dates, 2.0);

    let roster_base = assigner.assign(&estimate, &baseline, &dates, &employees, &config);
    let roster_doubled = assigner.assign(&estimate, &doubled, &dates, &employees, &config);

    // 45/15=3 人 vs 90/15=6 人
    assert_eq!(roster_base[0].staff_needed, 3);
    assert_eq!(roster_doubled[0].staff_needed, 6);
    assert!(roster_doubled[0].predicted_orders_per_hour > roster_base[0].predicted_orders_per_hour);
}

#[test]
fn test_full_flow_is_deterministic() {
    // 测试: 聚合 + 分配全流程重复运行,结果逐位一致
    let config = RosterConfig::default();
    let aggregator = DemandAggregator::new();
    let assigner = ShiftAssigner::new();

    let transactions = generator::generate_transactions(6, test_now());
    let employees = generator::generate_employees(10);
    let dates = planning_dates();

    let run = || {
        let estimate = aggregator.aggregate(
            &transactions,
            &config.shift_catalog,
            config.demand_window_days,
            test_now(),
        );
        let signal = ForecastSignal::baseline(&dates, 1.0);
        assigner.assign(&estimate, &signal, &dates, &employees, &config)
    };

    assert_eq!(run(), run());
}
