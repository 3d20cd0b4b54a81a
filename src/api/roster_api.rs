// ==========================================
// 门店排班系统 - 排班业务 API
// ==========================================
// 职责: 外层 (HTTP/CLI) 的业务入口
// 对应操作: 生成排班 / 员工列表 / 客流分析 / 系统统计
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::RosterConfig;
use crate::domain::demand::DemandEstimate;
use crate::domain::employee::Employee;
use crate::domain::roster::RosterBundle;
use crate::engine::demand::DemandAggregator;
use crate::engine::orchestrator::PipelineOrchestrator;
use crate::repository::{EmployeeSource, TransactionSource};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

// ==========================================
// SystemStats - 系统统计
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStats {
    pub total_transactions: usize,
    pub total_employees: usize,
    pub shifts_per_week: usize,
    pub location: String,
}

// ==========================================
// RosterApi - 排班业务 API
// ==========================================
pub struct RosterApi {
    orchestrator: Arc<PipelineOrchestrator>,
    transactions: Arc<dyn TransactionSource>,
    employees: Arc<dyn EmployeeSource>,
    config: RosterConfig,
    aggregator: DemandAggregator,
}

impl RosterApi {
    /// 创建新的 RosterApi 实例
    ///
    /// # 参数
    /// - orchestrator: 管线编排器
    /// - transactions: 流水来源 (分析接口复用)
    /// - employees: 员工来源
    /// - config: 排班配置
    pub fn new(
        orchestrator: Arc<PipelineOrchestrator>,
        transactions: Arc<dyn TransactionSource>,
        employees: Arc<dyn EmployeeSource>,
        config: RosterConfig,
    ) -> Self {
        Self {
            orchestrator,
            transactions,
            employees,
            config,
            aggregator: DemandAggregator::new(),
        }
    }

    /// 生成排班 (完整编排运行)
    ///
    /// # 参数
    /// - query: 经营者查询;空白时使用默认查询
    pub async fn generate_roster(&self, query: &str) -> ApiResult<RosterBundle> {
        let query = query.trim();
        let query = if query.is_empty() {
            "为下周生成最优排班"
        } else {
            query
        };

        info!(query, "收到排班生成请求");
        let bundle = self.orchestrator.run(query).await?;
        Ok(bundle)
    }

    /// 员工列表
    pub async fn list_employees(&self) -> ApiResult<Vec<Employee>> {
        Ok(self.employees.fetch_all().await?)
    }

    /// 历史客流分析
    ///
    /// # 参数
    /// - days_back: 回溯天数 (1..=365)
    pub async fn traffic_analysis(&self, days_back: i64) -> ApiResult<DemandEstimate> {
        if !(1..=365).contains(&days_back) {
            return Err(ApiError::InvalidInput(format!(
                "days_back 超出范围 (1..=365): {}",
                days_back
            )));
        }

        let now = Utc::now();
        let since = now - Duration::days(days_back);
        let transactions = self.transactions.fetch(since, self.config.fetch_limit).await?;

        Ok(self.aggregator.aggregate(
            &transactions,
            &self.config.shift_catalog,
            days_back,
            now,
        ))
    }

    /// 系统统计
    pub async fn stats(&self) -> ApiResult<SystemStats> {
        let now = Utc::now();
        let since = now - Duration::days(self.config.demand_window_days);
        let transactions = self.transactions.fetch(since, self.config.fetch_limit).await?;
        let employees = self.employees.fetch_all().await?;

        Ok(SystemStats {
            total_transactions: transactions.len(),
            total_employees: employees.len(),
            shifts_per_week: self.config.shift_catalog.len() * 7,
            location: self.config.location.clone(),
        })
    }
}
