// ==========================================
// 仓储层集成测试
// ==========================================
// 职责: 验证 SQLite 变体的建表、写入、读取与落库
// 场景: 临时文件数据库,进程内独立
// ==========================================

mod helpers;

use chrono::Duration;
use helpers::test_data_builder::{create_transaction, test_now, EmployeeBuilder};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use store_roster_aps::db::{init_schema, open_sqlite_connection};
use store_roster_aps::domain::employee::EmployeeRef;
use store_roster_aps::domain::roster::ShiftAssignment;
use store_roster_aps::domain::types::{AvailabilityClass, ShiftPreference};
use store_roster_aps::repository::{
    EmployeeSource, RosterSink, SqliteEmployeeSource, SqliteRosterSink, SqliteTransactionSource,
    TransactionSource,
};
use uuid::Uuid;

// ==========================================
// 测试辅助函数
// ==========================================

/// 创建临时文件数据库连接 (带表结构)
fn create_test_db() -> (tempfile::TempDir, Arc<Mutex<Connection>>) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test_store.db");
    let conn = open_sqlite_connection(db_path.to_str().unwrap()).unwrap();
    init_schema(&conn).unwrap();
    (dir, Arc::new(Mutex::new(conn)))
}

#[tokio::test]
async fn test_transaction_roundtrip_with_since_filter() {
    // 测试: 写入流水后按起始时间过滤读取
    let (_dir, conn) = create_test_db();
    let repo = SqliteTransactionSource::from_connection(conn);

    let transactions = vec![
        create_transaction(1, 2026, 7, 1, 9),  // 窗口外
        create_transaction(2, 2026, 8, 3, 9),  // 窗口内
        create_transaction(3, 2026, 8, 5, 17), // 窗口内
    ];
    assert_eq!(repo.insert_batch(&transactions).unwrap(), 3);
    assert_eq!(repo.count().unwrap(), 3);

    let since = test_now() - Duration::days(28);
    let fetched = repo.fetch(since, 1000).await.unwrap();

    assert_eq!(fetched.len(), 2);
    let ids: Vec<i64> = fetched.iter().map(|t| t.order_id).collect();
    assert_eq!(ids, vec![2, 3]); // 按时间升序
}

#[tokio::test]
async fn test_transaction_fetch_respects_limit() {
    // 测试: 拉取上限生效
    let (_dir, conn) = create_test_db();
    let repo = SqliteTransactionSource::from_connection(conn);

    let transactions: Vec<_> = (1..=10)
        .map(|i| create_transaction(i, 2026, 8, 3, 9))
        .collect();
    repo.insert_batch(&transactions).unwrap();

    let since = test_now() - Duration::days(28);
    let fetched = repo.fetch(since, 4).await.unwrap();
    assert_eq!(fetched.len(), 4);
}

#[tokio::test]
async fn test_employee_roundtrip_preserves_fields() {
    // 测试: 员工字段 (枚举含) 写读一致,按 ID 升序
    let (_dir, conn) = create_test_db();
    let repo = SqliteEmployeeSource::from_connection(conn);

    let employees = vec![
        EmployeeBuilder::new(2, "Jordan Patel")
            .availability(AvailabilityClass::WeekendOnly)
            .preference(ShiftPreference::Evening)
            .max_hours(24.0)
            .build(),
        EmployeeBuilder::new(1, "Alex Chen")
            .availability(AvailabilityClass::WeekdayOnly)
            .preference(ShiftPreference::Morning)
            .build(),
    ];
    repo.insert_batch(&employees).unwrap();

    let fetched = repo.fetch_all().await.unwrap();
    assert_eq!(fetched.len(), 2);

    // 按 employee_id 升序
    assert_eq!(fetched[0].employee_id, 1);
    assert_eq!(fetched[0].name, "Alex Chen");
    assert_eq!(fetched[0].availability, AvailabilityClass::WeekdayOnly);
    assert_eq!(fetched[0].shift_preference, ShiftPreference::Morning);

    assert_eq!(fetched[1].availability, AvailabilityClass::WeekendOnly);
    assert_eq!(fetched[1].max_hours_per_week, 24.0);
}

#[tokio::test]
async fn test_roster_sink_persists_items() {
    // 测试: 排班结果按运行 ID 落库
    let (_dir, conn) = create_test_db();
    let sink = SqliteRosterSink::from_connection(conn);

    let run_id = Uuid::new_v4();
    let roster = vec![
        ShiftAssignment {
            date: chrono::NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            day: "Monday".to_string(),
            shift: "morning".to_string(),
            shift_time: "08:00-16:00".to_string(),
            staff_needed: 2,
            staff_assigned: vec![EmployeeRef {
                employee_id: 1,
                name: "Alex Chen".to_string(),
            }],
            predicted_orders_per_hour: 21.5,
        },
        ShiftAssignment {
            date: chrono::NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            day: "Monday".to_string(),
            shift: "evening".to_string(),
            shift_time: "16:00-00:00".to_string(),
            staff_needed: 2,
            staff_assigned: vec![],
            predicted_orders_per_hour: 33.0,
        },
    ];

    sink.persist(run_id, &roster).await.unwrap();
    assert_eq!(sink.count_by_run(run_id).unwrap(), 2);

    // 其他运行 ID 不受影响
    assert_eq!(sink.count_by_run(Uuid::new_v4()).unwrap(), 0);

    // 重复落库同一运行 (INSERT OR REPLACE) 不产生重复行
    sink.persist(run_id, &roster).await.unwrap();
    assert_eq!(sink.count_by_run(run_id).unwrap(), 2);
}
