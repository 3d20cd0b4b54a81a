// ==========================================
// 门店排班系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 提供建表入口，供种子程序与测试复用
// ==========================================

use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据库表结构（幂等）
///
/// 表：
/// - pos_transaction: POS 订单流水
/// - employee: 员工主数据
/// - roster_item: 排班结果 (按编排运行落库)
/// - config_kv: 配置覆写
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS pos_transaction (
            order_id          INTEGER PRIMARY KEY,
            ts                TEXT NOT NULL,
            item_count        INTEGER NOT NULL,
            prep_time_minutes INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_pos_transaction_ts ON pos_transaction (ts);

        CREATE TABLE IF NOT EXISTS employee (
            employee_id        INTEGER PRIMARY KEY,
            name               TEXT NOT NULL,
            availability       TEXT NOT NULL,
            shift_preference   TEXT NOT NULL,
            max_hours_per_week REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS roster_item (
            run_id        TEXT NOT NULL,
            roster_date   TEXT NOT NULL,
            day           TEXT NOT NULL,
            shift         TEXT NOT NULL,
            shift_time    TEXT NOT NULL,
            staff_needed  INTEGER NOT NULL,
            staff_assigned TEXT NOT NULL,
            predicted_orders_per_hour REAL NOT NULL,
            PRIMARY KEY (run_id, roster_date, shift)
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key      TEXT NOT NULL,
            value    TEXT NOT NULL,
            PRIMARY KEY (scope_id, key)
        );
        "#,
    )
}

/// 获取默认数据库路径
///
/// 优先使用系统数据目录，取不到时回落到当前目录
pub fn get_default_db_path() -> String {
    let mut path: PathBuf = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("store-roster-aps");
    path.push("store_roster.db");
    path.to_string_lossy().to_string()
}
