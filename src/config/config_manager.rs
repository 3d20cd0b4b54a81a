// ==========================================
// 门店排班系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::roster_config::RosterConfig;
use crate::db::open_sqlite_connection;
use rusqlite::{params, Connection};
use std::error::Error;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// ==========================================
// 配置键全集
// ==========================================
pub mod config_keys {
    pub const MIN_STAFF_PER_SHIFT: &str = "roster/min_staff_per_shift";
    pub const ORDERS_PER_STAFF_RATIO: &str = "roster/orders_per_staff_ratio";
    pub const DEMAND_WINDOW_DAYS: &str = "roster/demand_window_days";
    pub const DEFAULT_AVG_ORDERS_PER_HOUR: &str = "roster/default_avg_orders_per_hour";
    pub const HORIZON_DAYS: &str = "roster/horizon_days";
    pub const HORIZON_OFFSET_DAYS: &str = "roster/horizon_offset_days";
    pub const DEFAULT_MULTIPLIER: &str = "forecast/default_multiplier";
    pub const FORECAST_MAX_ROUNDS: &str = "forecast/max_rounds";
    pub const FORECAST_TIMEOUT_SECS: &str = "forecast/timeout_secs";
    pub const LOCATION: &str = "store/location";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 参数
    /// - key: 配置键
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入配置值（scope_id='global'，存在则覆盖）
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;

        Ok(())
    }

    /// 读取配置值并解析为数值类型，缺失或非法时使用默认值
    fn get_parsed_or<T: FromStr + Copy>(&self, key: &str, default: T) -> Result<T, Box<dyn Error>> {
        match self.get_config_value(key)? {
            Some(raw) => Ok(raw.trim().parse::<T>().unwrap_or(default)),
            None => Ok(default),
        }
    }

    /// 加载完整的排班配置
    ///
    /// 数值项逐键读取（缺失回落到默认值）；班次目录由代码定义，
    /// 不从 config_kv 读取（班次结构变更属于版本发布，不是运行时配置）。
    ///
    /// # 返回
    /// 可直接传入管线的 RosterConfig
    pub fn load_roster_config(&self) -> Result<RosterConfig, Box<dyn Error>> {
        let defaults = RosterConfig::default();

        Ok(RosterConfig {
            shift_catalog: defaults.shift_catalog.clone(),
            min_staff_per_shift: self
                .get_parsed_or(config_keys::MIN_STAFF_PER_SHIFT, defaults.min_staff_per_shift)?,
            orders_per_staff_ratio: self.get_parsed_or(
                config_keys::ORDERS_PER_STAFF_RATIO,
                defaults.orders_per_staff_ratio,
            )?,
            demand_window_days: self
                .get_parsed_or(config_keys::DEMAND_WINDOW_DAYS, defaults.demand_window_days)?,
            default_avg_orders_per_hour: self.get_parsed_or(
                config_keys::DEFAULT_AVG_ORDERS_PER_HOUR,
                defaults.default_avg_orders_per_hour,
            )?,
            fetch_limit: defaults.fetch_limit,
            horizon_days: self.get_parsed_or(config_keys::HORIZON_DAYS, defaults.horizon_days)?,
            horizon_offset_days: self
                .get_parsed_or(config_keys::HORIZON_OFFSET_DAYS, defaults.horizon_offset_days)?,
            default_multiplier: self
                .get_parsed_or(config_keys::DEFAULT_MULTIPLIER, defaults.default_multiplier)?,
            forecast_max_rounds: self
                .get_parsed_or(config_keys::FORECAST_MAX_ROUNDS, defaults.forecast_max_rounds)?,
            forecast_timeout_secs: self
                .get_parsed_or(config_keys::FORECAST_TIMEOUT_SECS, defaults.forecast_timeout_secs)?,
            location: self
                .get_config_value(config_keys::LOCATION)?
                .unwrap_or(defaults.location),
        })
    }
}
