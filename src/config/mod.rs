// ==========================================
// 门店排班系统 - 配置层
// ==========================================
// 职责: 系统配置管理,支持数据库覆写
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod roster_config;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager};
pub use roster_config::RosterConfig;
