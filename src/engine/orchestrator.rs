// ==========================================
// 门店排班系统 - 管线编排器
// ==========================================
// 用途: 协调四个阶段的执行顺序
// 阶段: AnalyzeDemand -> FetchForecast -> AdjustAndAssign -> AssembleResult
// ==========================================
// 红线:
// - 阶段间无分支无内部重试;预测阶段是唯一允许超时的阶段
// - 历史数据不可用快速失败;其余降级继续
// - 落库失败不影响已算出的结果返回
// ==========================================

use crate::config::RosterConfig;
use crate::domain::demand::{DemandEstimate, ForecastSignal};
use crate::domain::employee::Employee;
use crate::domain::roster::RosterBundle;
use crate::engine::assigner::ShiftAssigner;
use crate::engine::demand::DemandAggregator;
use crate::forecast::{CommentaryGenerator, ForecastProvider};
use crate::repository::{EmployeeSource, RosterSink, TransactionSource};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::sync::Arc;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

// ==========================================
// PipelineError - 管线错误类型
// ==========================================
// 历史数据不可用是唯一向调用方传播的失败
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("历史数据不可用: {entity}: {reason}")]
    DataUnavailable { entity: String, reason: String },
}

/// Result 类型别名
pub type PipelineResult<T> = Result<T, PipelineError>;

// ==========================================
// PipelineOrchestrator - 管线编排器
// ==========================================
pub struct PipelineOrchestrator {
    transactions: Arc<dyn TransactionSource>,
    employees: Arc<dyn EmployeeSource>,
    forecaster: Arc<dyn ForecastProvider>,
    commentator: Arc<dyn CommentaryGenerator>,
    sink: Option<Arc<dyn RosterSink>>,
    config: RosterConfig,
    aggregator: DemandAggregator,
    assigner: ShiftAssigner,
}

impl PipelineOrchestrator {
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - transactions: 流水来源
    /// - employees: 员工来源
    /// - forecaster: 预测提供方
    /// - commentator: 评论生成方
    /// - sink: 排班结果落库 (可缺省)
    /// - config: 排班配置
    pub fn new(
        transactions: Arc<dyn TransactionSource>,
        employees: Arc<dyn EmployeeSource>,
        forecaster: Arc<dyn ForecastProvider>,
        commentator: Arc<dyn CommentaryGenerator>,
        sink: Option<Arc<dyn RosterSink>>,
        config: RosterConfig,
    ) -> Self {
        Self {
            transactions,
            employees,
            forecaster,
            commentator,
            sink,
            config,
            aggregator: DemandAggregator::new(),
            assigner: ShiftAssigner::new(),
        }
    }

    /// 计算计划窗口 (默认: 明天起 7 天)
    pub fn planning_dates(&self, now: DateTime<Utc>) -> Vec<NaiveDate> {
        let start = now.date_naive() + Duration::days(self.config.horizon_offset_days);
        (0..self.config.horizon_days)
            .map(|i| start + Duration::days(i))
            .collect()
    }

    /// 执行一次完整编排运行 (以当前时间为基准)
    pub async fn run(&self, query: &str) -> PipelineResult<RosterBundle> {
        self.run_at(query, Utc::now()).await
    }

    /// 执行一次完整编排运行
    ///
    /// 当前时间由调用方注入,便于测试
    ///
    /// # 参数
    /// - query: 经营者查询原文
    /// - now: 当前时间
    ///
    /// # 返回
    /// 结果包 (可能携带降级后的预测/空评论)
    pub async fn run_at(&self, query: &str, now: DateTime<Utc>) -> PipelineResult<RosterBundle> {
        let run_id = Uuid::new_v4();
        let planning_dates = self.planning_dates(now);

        info!(
            run_id = %run_id,
            query,
            horizon_days = planning_dates.len(),
            "开始执行排班编排"
        );

        // ==========================================
        // 阶段1+2: AnalyzeDemand / FetchForecast
        // ==========================================
        // 两个阶段互相独立,并发执行;分配必须等两者都完成
        debug!("阶段1: 需求分析 / 阶段2: 预测拉取 (并发)");

        let (analyze_result, signal) = futures::join!(
            self.analyze_demand(now),
            self.fetch_forecast(&planning_dates)
        );
        let (estimate, employees) = analyze_result?;

        info!(
            bucket_count = estimate.bucket_count(),
            employees_count = employees.len(),
            forecast_source = %signal.source,
            "需求分析与预测拉取完成"
        );

        // ==========================================
        // 阶段3: AdjustAndAssign
        // ==========================================
        debug!("阶段3: 调整并分配");

        let roster = self
            .assigner
            .assign(&estimate, &signal, &planning_dates, &employees, &self.config);

        info!(
            roster_len = roster.len(),
            understaffed = roster.iter().filter(|a| a.is_understaffed()).count(),
            "班次分配完成"
        );

        // ==========================================
        // 阶段4: AssembleResult
        // ==========================================
        debug!("阶段4: 组装结果");

        let demand_commentary = self
            .summarize_or_empty(&estimate.to_json(), query, "需求评论")
            .await;
        let forecast_commentary = self
            .summarize_or_empty(&signal.to_json(), query, "预测评论")
            .await;

        let bundle = RosterBundle {
            run_id,
            query: query.to_string(),
            demand_commentary,
            forecast_commentary,
            roster,
            planning_dates,
            forecast_source: signal.source,
        };

        // 落库尽力而为,失败只记日志
        if let Some(sink) = &self.sink {
            if let Err(e) = sink.persist(run_id, &bundle.roster).await {
                warn!(run_id = %run_id, error = %e, "排班结果落库失败,结果仍返回调用方");
            }
        }

        info!(run_id = %run_id, "排班编排完成");
        Ok(bundle)
    }

    // ==========================================
    // 阶段实现
    // ==========================================

    /// 阶段1: 需求分析
    ///
    /// 流水或员工为空/不可达 => DataUnavailable,不伪造数据
    async fn analyze_demand(
        &self,
        now: DateTime<Utc>,
    ) -> PipelineResult<(DemandEstimate, Vec<Employee>)> {
        let since = now - Duration::days(self.config.demand_window_days);

        let transactions = self
            .transactions
            .fetch(since, self.config.fetch_limit)
            .await
            .map_err(|e| PipelineError::DataUnavailable {
                entity: "pos_transaction".to_string(),
                reason: e.to_string(),
            })?;

        if transactions.is_empty() {
            return Err(PipelineError::DataUnavailable {
                entity: "pos_transaction".to_string(),
                reason: "窗口内无流水".to_string(),
            });
        }

        let employees =
            self.employees
                .fetch_all()
                .await
                .map_err(|e| PipelineError::DataUnavailable {
                    entity: "employee".to_string(),
                    reason: e.to_string(),
                })?;

        if employees.is_empty() {
            return Err(PipelineError::DataUnavailable {
                entity: "employee".to_string(),
                reason: "员工列表为空".to_string(),
            });
        }

        let estimate = self.aggregator.aggregate(
            &transactions,
            &self.config.shift_catalog,
            self.config.demand_window_days,
            now,
        );

        Ok((estimate, employees))
    }

    /// 阶段2: 预测拉取
    ///
    /// 超时或失败 => 中性信号,运行继续
    async fn fetch_forecast(&self, planning_dates: &[NaiveDate]) -> ForecastSignal {
        let budget = std::time::Duration::from_secs(self.config.forecast_timeout_secs);

        match timeout(
            budget,
            self.forecaster.fetch(&self.config.location, planning_dates),
        )
        .await
        {
            Ok(Ok(signal)) => signal,
            Ok(Err(e)) => {
                warn!(error = %e, "预测提供方失败,使用中性信号");
                ForecastSignal::baseline(planning_dates, self.config.default_multiplier)
            }
            Err(_) => {
                warn!(timeout_secs = self.config.forecast_timeout_secs, "预测阶段超时,使用中性信号");
                ForecastSignal::baseline(planning_dates, self.config.default_multiplier)
            }
        }
    }

    /// 评论生成,失败时以空串顶替
    async fn summarize_or_empty(
        &self,
        structured: &serde_json::Value,
        query: &str,
        label: &str,
    ) -> String {
        match self.commentator.summarize(structured, query).await {
            Ok(text) => text,
            Err(e) => {
                warn!(label, error = %e, "评论生成失败,以空串顶替");
                String::new()
            }
        }
    }
}
