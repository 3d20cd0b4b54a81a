// ==========================================
// 门店排班系统 - 班次分配引擎
// ==========================================
// 职责: 贪心满足约束的人员分配
// 输入: 需求估计 + 预测信号 + 计划窗口 + 员工快照
// 输出: 排班表 (每个 (日期, 班次) 恰好一条)
// ==========================================
// 红线:
// - 周工时上限优先于需求人数
// - 缺员是数据,不是错误
// - 相同输入必须产出逐位一致的排班表 (禁止随机决胜)
// ==========================================

use crate::config::RosterConfig;
use crate::domain::demand::{DemandEstimate, ForecastSignal};
use crate::domain::employee::{Employee, EmployeeRef};
use crate::domain::roster::{Roster, ShiftAssignment};
use crate::domain::shift::ShiftWindow;
use crate::domain::types::day_name;
use crate::engine::availability::AvailabilityFilter;
use crate::engine::forecast::ForecastAdjuster;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// ShiftAssigner - 班次分配引擎
// ==========================================
pub struct ShiftAssigner {
    filter: AvailabilityFilter,
    adjuster: ForecastAdjuster,
}

impl ShiftAssigner {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            filter: AvailabilityFilter::new(),
            adjuster: ForecastAdjuster::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 对整个计划窗口执行贪心分配
    ///
    /// 规则（逐 (日期, 班次)，日期按入参顺序，班次按目录顺序）：
    /// 1) 调整后订单率 = ForecastAdjuster.adjust(...)
    /// 2) 需求人数 = max(min_staff_per_shift, floor(调整后订单率 / orders_per_staff_ratio))
    /// 3) 候选 = AvailabilityFilter.filter(...)
    /// 4) 候选按 (偏好得分 降序, 已分配工时 升序) 稳定排序;
    ///    两个键都相同时保持输入顺序
    /// 5) 依次尝试: 人数未满 且 工时 + 班次时长 <= 周上限 才排入;
    ///    否则跳过 (同一轮后续班次仍可排)
    ///
    /// 工时累计器跨整个窗口携带,不按天清零 —— 这是周工时公平性的来源;
    /// 累计器为本次调用私有,不对外暴露
    ///
    /// # 参数
    /// - estimate: 需求估计
    /// - signal: 预测信号
    /// - planning_dates: 计划窗口 (顺序即输出顺序)
    /// - employees: 员工快照
    /// - config: 排班配置
    ///
    /// # 返回
    /// 排班表，恰好 |planning_dates| × |班次目录| 条
    #[instrument(skip(self, estimate, signal, employees, config), fields(
        dates_count = planning_dates.len(),
        employees_count = employees.len()
    ))]
    pub fn assign(
        &self,
        estimate: &DemandEstimate,
        signal: &ForecastSignal,
        planning_dates: &[NaiveDate],
        employees: &[Employee],
        config: &RosterConfig,
    ) -> Roster {
        // 跨窗口工时累计器 (employee_id -> 已分配小时数)
        let mut hours_used: HashMap<i64, f64> = employees
            .iter()
            .map(|e| (e.employee_id, 0.0))
            .collect();

        let mut roster = Vec::with_capacity(planning_dates.len() * config.shift_catalog.len());

        for &date in planning_dates {
            let day = day_name(date);

            for shift in config.shift_catalog.iter() {
                // 1) 调整后订单率
                let adjusted =
                    self.adjuster
                        .adjust(estimate, day, &shift.name, date, signal, config);

                // 2) 需求人数 (最低人数兜底;上不封顶)
                let staff_needed = ((adjusted / config.orders_per_staff_ratio).floor() as i32)
                    .max(config.min_staff_per_shift);

                // 3) 候选员工
                let mut candidates = self.filter.filter(employees, day, &shift.name);

                // 4) 偏好得分降序,同分者已分配工时少者在前;稳定排序保底输入序
                candidates.sort_by(|a, b| {
                    b.preference_score
                        .cmp(&a.preference_score)
                        .then_with(|| {
                            let ha = hours_used
                                .get(&a.employee.employee_id)
                                .copied()
                                .unwrap_or(0.0);
                            let hb = hours_used
                                .get(&b.employee.employee_id)
                                .copied()
                                .unwrap_or(0.0);
                            ha.total_cmp(&hb)
                        })
                });

                // 5) 贪心排入
                let duration = shift.duration_hours();
                let mut assigned: Vec<EmployeeRef> = Vec::new();

                for candidate in &candidates {
                    if assigned.len() as i32 >= staff_needed {
                        break;
                    }

                    let id = candidate.employee.employee_id;
                    let used = hours_used.get(&id).copied().unwrap_or(0.0);
                    if used + duration > candidate.employee.max_hours_per_week {
                        // 周工时上限: 本班次跳过,后续班次仍是候选
                        continue;
                    }

                    assigned.push(EmployeeRef::from(&candidate.employee));
                    *hours_used.entry(id).or_insert(0.0) += duration;
                }

                if (assigned.len() as i32) < staff_needed {
                    debug!(
                        date = %date,
                        shift = %shift.name,
                        staff_needed,
                        staff_assigned = assigned.len(),
                        "班次缺员"
                    );
                }

                roster.push(ShiftAssignment {
                    date,
                    day: day.to_string(),
                    shift: shift.name.clone(),
                    shift_time: shift.time_range(),
                    staff_needed,
                    staff_assigned: assigned,
                    predicted_orders_per_hour: adjusted,
                });
            }
        }

        roster
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for ShiftAssigner {
    fn default() -> Self {
        Self::new()
    }
}
