// ==========================================
// 门店排班系统 - 员工领域模型
// ==========================================
// 红线: 员工主数据不可变,引擎只派生带分标注副本
// ==========================================

use crate::domain::types::{AvailabilityClass, ShiftPreference};
use serde::{Deserialize, Serialize};

// ==========================================
// Employee - 员工主数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    // ===== 主键 =====
    pub employee_id: i64,              // 员工ID

    // ===== 基本信息 =====
    pub name: String,                  // 姓名

    // ===== 排班约束 =====
    pub availability: AvailabilityClass,   // 可用性类别
    pub shift_preference: ShiftPreference, // 班次偏好
    pub max_hours_per_week: f64,           // 周工时上限 (小时)
}

// ==========================================
// ScoredEmployee - 带偏好得分的候选员工
// ==========================================
// 由 AvailabilityFilter 对某个 (星期, 班次) 查询派生
// 不回写主数据
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEmployee {
    pub employee: Employee,
    pub preference_score: i32, // 2=偏好匹配, 1=无偏好, 0=偏好另一班次
}

// ==========================================
// EmployeeRef - 排班结果中的员工引用
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRef {
    pub employee_id: i64,
    pub name: String,
}

impl From<&Employee> for EmployeeRef {
    fn from(emp: &Employee) -> Self {
        Self {
            employee_id: emp.employee_id,
            name: emp.name.clone(),
        }
    }
}
