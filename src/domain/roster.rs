// ==========================================
// 门店排班系统 - 排班结果领域模型
// ==========================================
// 红线: 缺员是一等数据,不是错误
// ==========================================

use crate::domain::employee::EmployeeRef;
use crate::domain::types::ForecastSource;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// ShiftAssignment - 单个 (日期, 班次) 的排班结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    // ===== 槽位标识 =====
    pub date: NaiveDate,       // 排班日期
    pub day: String,           // 星期名
    pub shift: String,         // 班次名
    pub shift_time: String,    // 展示用时间段 (如 "08:00-16:00")

    // ===== 需求与供给 =====
    pub staff_needed: i32,                  // 需求人数 (含最低人数兜底)
    pub staff_assigned: Vec<EmployeeRef>,   // 实际排入员工 (可少于需求)
    pub predicted_orders_per_hour: f64,     // 调整后预测订单率
}

impl ShiftAssignment {
    /// 是否缺员
    pub fn is_understaffed(&self) -> bool {
        (self.staff_assigned.len() as i32) < self.staff_needed
    }

    /// 缺口人数
    pub fn shortfall(&self) -> i32 {
        (self.staff_needed - self.staff_assigned.len() as i32).max(0)
    }
}

// ==========================================
// Roster - 排班表
// ==========================================
// 计划窗口内每个 (日期, 班次) 恰好一条,按日期序 × 目录序
pub type Roster = Vec<ShiftAssignment>;

// ==========================================
// RosterBundle - 编排运行结果包
// ==========================================
// AssembleResult 阶段的产物;评论字段为外部协作方产出的不透明文本
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterBundle {
    pub run_id: Uuid,                 // 本次编排运行ID
    pub query: String,                // 经营者查询原文
    pub demand_commentary: String,    // 需求分析评论 (协作方失败时为空串)
    pub forecast_commentary: String,  // 预测影响评论 (协作方失败时为空串)
    pub roster: Roster,               // 排班表
    pub planning_dates: Vec<NaiveDate>, // 计划窗口
    pub forecast_source: ForecastSource, // 预测信号来源 (交互/兜底)
}

impl RosterBundle {
    /// 缺员槽位数（驾驶舱/报表用）
    pub fn understaffed_count(&self) -> usize {
        self.roster.iter().filter(|a| a.is_understaffed()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_understaffed_and_shortfall() {
        let assignment = ShiftAssignment {
            date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            day: "Monday".to_string(),
            shift: "morning".to_string(),
            shift_time: "08:00-16:00".to_string(),
            staff_needed: 3,
            staff_assigned: vec![EmployeeRef {
                employee_id: 1,
                name: "Alex Chen".to_string(),
            }],
            predicted_orders_per_hour: 42.0,
        };

        assert!(assignment.is_understaffed());
        assert_eq!(assignment.shortfall(), 2);
    }
}
