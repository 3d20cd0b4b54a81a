// ==========================================
// 门店排班系统 - 可用性过滤引擎
// ==========================================
// 职责: 给定 (星期, 班次),产出带偏好得分的候选员工
// 红线: 不改变输入顺序,排序由调用方完成
// ==========================================

use crate::domain::employee::{Employee, ScoredEmployee};
use crate::domain::types::{is_weekend, AvailabilityClass};

// ==========================================
// AvailabilityFilter - 可用性过滤引擎
// ==========================================
pub struct AvailabilityFilter {
    // 无状态引擎,不需要注入依赖
}

impl AvailabilityFilter {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 过滤出某 (星期, 班次) 的候选员工
    ///
    /// 排除规则:
    /// - weekday_only 且当天为周末
    /// - weekend_only 且当天非周末
    ///
    /// 偏好得分:
    /// - 2: 偏好与班次一致
    /// - 1: 无偏好
    /// - 0: 偏好另一班次 (仍可排入)
    ///
    /// # 参数
    /// - employees: 员工快照
    /// - day: 星期名
    /// - shift_name: 班次名
    ///
    /// # 返回
    /// 候选列表，保持输入顺序
    pub fn filter(&self, employees: &[Employee], day: &str, shift_name: &str) -> Vec<ScoredEmployee> {
        let weekend = is_weekend(day);

        employees
            .iter()
            .filter(|emp| match emp.availability {
                AvailabilityClass::WeekdayOnly => !weekend,
                AvailabilityClass::WeekendOnly => weekend,
                AvailabilityClass::All => true,
            })
            .map(|emp| {
                let preference_score = if emp.shift_preference.matches(shift_name) {
                    2
                } else if emp.shift_preference == crate::domain::types::ShiftPreference::NoPreference {
                    1
                } else {
                    0
                };

                ScoredEmployee {
                    employee: emp.clone(),
                    preference_score,
                }
            })
            .collect()
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for AvailabilityFilter {
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
    use crate::domain::types::ShiftPreference;

    // ==========================================
    // 测试辅助函数
    // ==========================================

    fn create_employee(
        id: i64,
        name: &str,
        availability: AvailabilityClass,
        preference: ShiftPreference,
    ) -> Employee {
        Employee {
            employee_id: id,
            name: name.to_string(),
            availability,
            shift_preference: preference,
            max_hours_per_week: 40.0,
        }
    }

    #[test]
    fn test_weekday_only_excluded_on_weekend() {
        // 测试: weekday_only 员工周末被排除
        let filter = AvailabilityFilter::new();
        let employees = vec![
            create_employee(1, "A", AvailabilityClass::WeekdayOnly, ShiftPreference::Morning),
            create_employee(2, "B", AvailabilityClass::All, ShiftPreference::Morning),
        ];

        let candidates = filter.filter(&employees, "Saturday", "morning");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].employee.employee_id, 2);
    }

    #[test]
    fn test_weekend_only_excluded_on_weekday() {
        // 测试: weekend_only 员工工作日被排除
        let filter = AvailabilityFilter::new();
        let employees = vec![
            create_employee(1, "A", AvailabilityClass::WeekendOnly, ShiftPreference::NoPreference),
            create_employee(2, "B", AvailabilityClass::All, ShiftPreference::NoPreference),
        ];

        let candidates = filter.filter(&employees, "Wednesday", "evening");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].employee.employee_id, 2);
    }

    #[test]
    fn test_preference_scores() {
        // 测试: 偏好得分 2/1/0
        let filter = AvailabilityFilter::new();
        let employees = vec![
            create_employee(1, "A", AvailabilityClass::All, ShiftPreference::Morning),
            create_employee(2, "B", AvailabilityClass::All, ShiftPreference::NoPreference),
            create_employee(3, "C", AvailabilityClass::All, ShiftPreference::Evening),
        ];

        let candidates = filter.filter(&employees, "Monday", "morning");
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].preference_score, 2); // 偏好匹配
        assert_eq!(candidates[1].preference_score, 1); // 无偏好
        assert_eq!(candidates[2].preference_score, 0); // 偏好晚班,仍是候选
    }

    #[test]
    fn test_output_preserves_source_order() {
        // 测试: 输出保持输入顺序
        let filter = AvailabilityFilter::new();
        let employees = vec![
            create_employee(9, "X", AvailabilityClass::All, ShiftPreference::Evening),
            create_employee(3, "Y", AvailabilityClass::All, ShiftPreference::Morning),
            create_employee(7, "Z", AvailabilityClass::All, ShiftPreference::NoPreference),
        ];

        let candidates = filter.filter(&employees, "Friday", "morning");
        let ids: Vec<i64> = candidates.iter().map(|c| c.employee.employee_id).collect();
        assert_eq!(ids, vec![9, 3, 7]);
    }
}
