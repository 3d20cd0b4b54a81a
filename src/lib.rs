// ==========================================
// 门店排班系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 决策支持系统 (人工最终控制权)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 预测层 - 外部文本生成协作方
pub mod forecast;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 合成数据生成
pub mod generator;

// 报表输出
pub mod report;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AvailabilityClass, ForecastSource, ShiftPreference};

// 领域实体
pub use domain::{
    DemandEstimate, Employee, EmployeeRef, ForecastSignal, Roster, RosterBundle, ScoredEmployee,
    ShiftAssignment, ShiftCatalog, ShiftDefinition, Transaction,
};

// 引擎
pub use engine::{
    AvailabilityFilter, DemandAggregator, ForecastAdjuster, PipelineError, PipelineOrchestrator,
    ShiftAssigner,
};

// 配置
pub use config::RosterConfig;

// API
pub use api::RosterApi;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "门店排班系统";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";

// ==========================================
// 预编译检查
// ==========================================

// 确保编译时所有模块可见
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
