// ==========================================
// 门店数据库种子程序
// ==========================================
// 用途: 建表并写入合成流水/员工数据
// 输出: SQLite 数据库 (默认路径或命令行第一个参数)
// ==========================================

use chrono::Utc;
use rusqlite::Connection;
use std::error::Error;
use std::sync::{Arc, Mutex};

use store_roster_aps::config::ConfigManager;
use store_roster_aps::db::{get_default_db_path, init_schema, open_sqlite_connection};
use store_roster_aps::generator;
use store_roster_aps::repository::{SqliteEmployeeSource, SqliteTransactionSource};

const SEED_WEEKS: usize = 26;
const SEED_EMPLOYEES: usize = 10;

fn main() -> Result<(), Box<dyn Error>> {
    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);

    println!("门店排班系统 - 数据库种子程序");
    println!("目标数据库: {}", db_path);

    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn: Connection = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;
    println!("表结构初始化完成");

    let conn = Arc::new(Mutex::new(conn));

    // 合成数据
    let now = Utc::now();
    let transactions = generator::generate_transactions(SEED_WEEKS, now);
    let employees = generator::generate_employees(SEED_EMPLOYEES);

    // 写入
    let tx_repo = SqliteTransactionSource::from_connection(conn.clone());
    let inserted_tx = tx_repo.insert_batch(&transactions)?;
    println!("已写入流水: {} 条", inserted_tx);

    let emp_repo = SqliteEmployeeSource::from_connection(conn.clone());
    let inserted_emp = emp_repo.insert_batch(&employees)?;
    println!("已写入员工: {} 名", inserted_emp);

    // 回读生效配置 (config_kv 覆写 + 默认值)
    let config_manager = ConfigManager::from_connection(conn)?;
    let config = config_manager.load_roster_config()?;
    println!(
        "生效配置: 每班最低 {} 人, 回溯窗口 {} 天, 计划窗口 {} 天",
        config.min_staff_per_shift, config.demand_window_days, config.horizon_days
    );

    println!("种子数据写入完成");
    Ok(())
}
