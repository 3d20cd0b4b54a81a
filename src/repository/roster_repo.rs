// ==========================================
// 门店排班系统 - 排班结果数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::roster::Roster;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::RosterSink;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// SqliteRosterSink - 排班结果仓储
// ==========================================

/// 排班结果仓储
/// 职责: 管理 roster_item 表的写入与查询
pub struct SqliteRosterSink {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRosterSink {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 统计某次编排运行落库的条数
    pub fn count_by_run(&self, run_id: Uuid) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row(
            "SELECT COUNT(*) FROM roster_item WHERE run_id = ?1",
            params![run_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(n)
    }
}

#[async_trait]
impl RosterSink for SqliteRosterSink {
    /// 持久化一次编排运行的排班表
    ///
    /// staff_assigned 以 JSON 存储（读侧只做展示，不参与重算）
    async fn persist(&self, run_id: Uuid, roster: &Roster) -> RepositoryResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseQueryError(e.to_string()))?;

        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO roster_item
                    (run_id, roster_date, day, shift, shift_time,
                     staff_needed, staff_assigned, predicted_orders_per_hour)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;

            for item in roster {
                let staff_json = serde_json::to_string(&item.staff_assigned)
                    .map_err(|e| RepositoryError::InternalError(e.to_string()))?;

                stmt.execute(params![
                    run_id.to_string(),
                    item.date.format("%Y-%m-%d").to_string(),
                    item.day,
                    item.shift,
                    item.shift_time,
                    item.staff_needed,
                    staff_json,
                    item.predicted_orders_per_hour,
                ])?;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseQueryError(e.to_string()))?;
        Ok(())
    }
}
