// ==========================================
// 门店排班系统 - 内存/合成数据变体
// ==========================================
// 用途: 演示运行与测试;与 SQLite 变体实现同一组能力接口
// 红线: 快照只读,运行期间不可变更
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::roster::Roster;
use crate::domain::transaction::Transaction;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{EmployeeSource, RosterSink, TransactionSource};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use uuid::Uuid;

// ==========================================
// InMemoryTransactionSource - 内存流水快照
// ==========================================
pub struct InMemoryTransactionSource {
    transactions: Vec<Transaction>,
}

impl InMemoryTransactionSource {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }
}

#[async_trait]
impl TransactionSource for InMemoryTransactionSource {
    async fn fetch(&self, since: DateTime<Utc>, limit: usize) -> RepositoryResult<Vec<Transaction>> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.timestamp >= since)
            .take(limit)
            .cloned()
            .collect())
    }
}

// ==========================================
// InMemoryEmployeeSource - 内存员工快照
// ==========================================
pub struct InMemoryEmployeeSource {
    employees: Vec<Employee>,
}

impl InMemoryEmployeeSource {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }
}

#[async_trait]
impl EmployeeSource for InMemoryEmployeeSource {
    async fn fetch_all(&self) -> RepositoryResult<Vec<Employee>> {
        Ok(self.employees.clone())
    }
}

// ==========================================
// RecordingRosterSink - 记录型落库桩
// ==========================================
// 测试用: 记录每次 persist 调用;可配置为恒定失败,
// 用于验证“落库失败不影响返回结果”
pub struct RecordingRosterSink {
    persisted: Mutex<Vec<(Uuid, Roster)>>,
    fail: bool,
}

impl RecordingRosterSink {
    pub fn new() -> Self {
        Self {
            persisted: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// 恒定失败变体
    pub fn failing() -> Self {
        Self {
            persisted: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// 已记录的 persist 次数
    pub fn persisted_count(&self) -> usize {
        self.persisted.lock().map(|v| v.len()).unwrap_or(0)
    }
}

impl Default for RecordingRosterSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RosterSink for RecordingRosterSink {
    async fn persist(&self, run_id: Uuid, roster: &Roster) -> RepositoryResult<()> {
        if self.fail {
            return Err(RepositoryError::DatabaseConnectionError(
                "sink unavailable".to_string(),
            ));
        }
        self.persisted
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?
            .push((run_id, roster.clone()));
        Ok(())
    }
}
