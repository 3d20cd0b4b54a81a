// ==========================================
// 门店排班系统 - 数据仓储层
// ==========================================
// 职责: 数据访问与来源能力接口
// 红线: Repository 不含业务逻辑
// ==========================================
// 能力接口由两类变体实现:
// - 内存/合成变体 (memory) - 演示与测试
// - 外部存储变体 (SQLite) - 生产数据
// 编排器只依赖接口,不依赖具体变体
// ==========================================

pub mod employee_repo;
pub mod error;
pub mod memory;
pub mod roster_repo;
pub mod transaction_repo;

use crate::domain::employee::Employee;
use crate::domain::roster::Roster;
use crate::domain::transaction::Transaction;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use employee_repo::SqliteEmployeeSource;
pub use error::{RepositoryError, RepositoryResult};
pub use memory::{InMemoryEmployeeSource, InMemoryTransactionSource, RecordingRosterSink};
pub use roster_repo::SqliteRosterSink;
pub use transaction_repo::SqliteTransactionSource;

// ==========================================
// TransactionSource Trait
// ==========================================
// 用途: 历史 POS 流水读取接口
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// 拉取指定时间之后的流水
    ///
    /// # 参数
    /// - since: 起始时间 (含)
    /// - limit: 拉取上限
    ///
    /// # 返回
    /// 流水列表（顺序无约束，核心只消费 timestamp）
    async fn fetch(&self, since: DateTime<Utc>, limit: usize) -> RepositoryResult<Vec<Transaction>>;
}

// ==========================================
// EmployeeSource Trait
// ==========================================
// 用途: 员工主数据读取接口
#[async_trait]
pub trait EmployeeSource: Send + Sync {
    /// 拉取全部员工
    ///
    /// # 返回
    /// 员工列表（顺序即候选的稳定兜底序）
    async fn fetch_all(&self) -> RepositoryResult<Vec<Employee>>;
}

// ==========================================
// RosterSink Trait
// ==========================================
// 用途: 排班结果落库接口
// 红线: 落库失败不得使已算出的排班表失效
#[async_trait]
pub trait RosterSink: Send + Sync {
    /// 持久化一次编排运行的排班表
    ///
    /// # 参数
    /// - run_id: 编排运行ID
    /// - roster: 排班表
    async fn persist(&self, run_id: Uuid, roster: &Roster) -> RepositoryResult<()>;
}
