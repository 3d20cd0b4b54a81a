// ==========================================
// 门店排班系统 - 员工数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::types::{AvailabilityClass, ShiftPreference};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::EmployeeSource;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// SqliteEmployeeSource - 员工仓储
// ==========================================

/// 员工仓储
/// 职责: 管理 employee 表的读写
pub struct SqliteEmployeeSource {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteEmployeeSource {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 批量写入员工（种子程序用）
    pub fn insert_batch(&self, employees: &[Employee]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseQueryError(e.to_string()))?;

        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO employee
                    (employee_id, name, availability, shift_preference, max_hours_per_week)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;

            for e in employees {
                stmt.execute(params![
                    e.employee_id,
                    e.name,
                    e.availability.to_db_str(),
                    e.shift_preference.to_db_str(),
                    e.max_hours_per_week,
                ])?;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseQueryError(e.to_string()))?;
        Ok(employees.len())
    }
}

#[async_trait]
impl EmployeeSource for SqliteEmployeeSource {
    /// 拉取全部员工
    ///
    /// 按 employee_id 升序返回，保证候选兜底序稳定
    async fn fetch_all(&self) -> RepositoryResult<Vec<Employee>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT employee_id, name, availability, shift_preference, max_hours_per_week
            FROM employee
            ORDER BY employee_id
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Employee {
                employee_id: row.get(0)?,
                name: row.get(1)?,
                availability: AvailabilityClass::from_db_str(&row.get::<_, String>(2)?),
                shift_preference: ShiftPreference::from_db_str(&row.get::<_, String>(3)?),
                max_hours_per_week: row.get(4)?,
            })
        })?;

        let mut employees = Vec::new();
        for row in rows {
            employees.push(row?);
        }

        Ok(employees)
    }
}
