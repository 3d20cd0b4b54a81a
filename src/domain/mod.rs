// ==========================================
// 门店排班系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、业务规则接口
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod demand;
pub mod employee;
pub mod roster;
pub mod shift;
pub mod transaction;
pub mod types;

// 重导出核心类型
pub use demand::{DemandEstimate, ForecastSignal};
pub use employee::{Employee, EmployeeRef, ScoredEmployee};
pub use roster::{Roster, RosterBundle, ShiftAssignment};
pub use shift::{ShiftCatalog, ShiftDefinition, ShiftWindow};
pub use transaction::Transaction;
pub use types::{day_name, is_weekend, AvailabilityClass, ForecastSource, ShiftPreference};
