// ==========================================
// 门店排班系统 - 引擎层
// ==========================================
// 职责: 实现业务规则引擎,不拼 SQL
// 红线: Engine 不拼 SQL, 关键决策必须输出日志
// ==========================================

pub mod assigner;
pub mod availability;
pub mod demand;
pub mod forecast;
pub mod orchestrator;

// 重导出核心引擎
pub use assigner::ShiftAssigner;
pub use availability::AvailabilityFilter;
pub use demand::DemandAggregator;
pub use forecast::ForecastAdjuster;
pub use orchestrator::{PipelineError, PipelineOrchestrator};
