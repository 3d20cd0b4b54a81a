// ==========================================
// 门店排班系统 - POS 流水数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::transaction::Transaction;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::TransactionSource;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// SqliteTransactionSource - 流水仓储
// ==========================================

/// POS 流水仓储
/// 职责: 管理 pos_transaction 表的读写
pub struct SqliteTransactionSource {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTransactionSource {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 批量写入流水（种子程序用）
    ///
    /// # 参数
    /// - transactions: 流水列表
    ///
    /// # 返回
    /// 写入条数
    pub fn insert_batch(&self, transactions: &[Transaction]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseQueryError(e.to_string()))?;

        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO pos_transaction
                    (order_id, ts, item_count, prep_time_minutes)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;

            for t in transactions {
                stmt.execute(params![
                    t.order_id,
                    t.timestamp.to_rfc3339(),
                    t.item_count,
                    t.prep_time_minutes,
                ])?;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseQueryError(e.to_string()))?;
        Ok(transactions.len())
    }

    /// 统计流水总量
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM pos_transaction", [], |row| row.get(0))?;
        Ok(n)
    }
}

#[async_trait]
impl TransactionSource for SqliteTransactionSource {
    /// 拉取指定时间之后的流水
    ///
    /// ts 以 RFC3339 (UTC) 存储，字典序与时间序一致，可直接范围比较
    async fn fetch(&self, since: DateTime<Utc>, limit: usize) -> RepositoryResult<Vec<Transaction>> {
        let conn = self.get_conn()?;
        let since_str = since.to_rfc3339();

        let mut stmt = conn.prepare(
            r#"
            SELECT order_id, ts, item_count, prep_time_minutes
            FROM pos_transaction
            WHERE ts >= ?1
            ORDER BY ts
            LIMIT ?2
            "#,
        )?;

        let rows = stmt.query_map(params![since_str, limit as i64], |row| {
            let ts_str: String = row.get(1)?;
            Ok((
                row.get::<_, i64>(0)?,
                ts_str,
                row.get::<_, i32>(2)?,
                row.get::<_, i32>(3)?,
            ))
        })?;

        let mut transactions = Vec::new();
        for row in rows {
            let (order_id, ts_str, item_count, prep_time_minutes) = row?;
            let timestamp = DateTime::parse_from_rfc3339(&ts_str)
                .map_err(|e| {
                    RepositoryError::ValidationError(format!(
                        "流水时间戳非法: order_id={}, ts={}, err={}",
                        order_id, ts_str, e
                    ))
                })?
                .with_timezone(&Utc);

            transactions.push(Transaction {
                order_id,
                timestamp,
                item_count,
                prep_time_minutes,
            });
        }

        Ok(transactions)
    }
}
