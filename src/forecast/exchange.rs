// ==========================================
// 门店排班系统 - 预测交互状态机
// ==========================================
// 职责: 与文本生成协作方的有界工具调用交互
// 状态: Requesting -> AwaitingToolResult -> Done / Fallback
// 红线: 轮数上限用尽必须回落到中性信号,绝不让运行失败
// ==========================================

use crate::domain::demand::ForecastSignal;
use crate::domain::types::ForecastSource;
use crate::forecast::{ChatMessage, ChatTransport, ChatTurn, ForecastProvider, ToolResolver};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

// ==========================================
// ExchangeState - 交互状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeState {
    Requesting,        // 等待模型输出
    AwaitingToolResult, // 模型请求了工具,等待工具结果
    Done,              // 已解析出信号
    Fallback,          // 轮数用尽,回落中性信号
}

// ==========================================
// ExchangeForecastProvider - 交互式预测提供方
// ==========================================
pub struct ExchangeForecastProvider {
    transport: Arc<dyn ChatTransport>,
    resolver: Arc<dyn ToolResolver>,
    max_rounds: u32,        // 传输调用次数上限
    default_multiplier: f64, // 兜底乘数
}

impl ExchangeForecastProvider {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        resolver: Arc<dyn ToolResolver>,
        max_rounds: u32,
        default_multiplier: f64,
    ) -> Self {
        Self {
            transport,
            resolver,
            max_rounds,
            default_multiplier,
        }
    }

    /// 构造首轮提示词
    fn build_prompt(&self, location: &str, dates: &[NaiveDate]) -> String {
        let date_list: Vec<String> = dates.iter().map(|d| d.to_string()).collect();
        format!(
            "你是门店客流预测助手。门店位于 {location}。\
             可以调用 web_search 工具查询 {first} 至 {last} 的天气预报。\
             根据天气对客流的影响 (炎热 +20%, 降雨 -30%, 温和为基线),\
             为每个日期给出客流乘数。\
             最终只输出一个 JSON 对象, 键为日期 (YYYY-MM-DD), 值为乘数, 例如 \
             {{\"{first}\": 1.1}}。日期: {dates}",
            location = location,
            first = date_list.first().map(String::as_str).unwrap_or(""),
            last = date_list.last().map(String::as_str).unwrap_or(""),
            dates = date_list.join(", "),
        )
    }

    /// 从终结文本中解析日期->乘数映射
    ///
    /// 只接受计划窗口内的日期;未覆盖的日期补默认乘数,
    /// 保证信号对窗口内每一天都有值
    fn parse_signal(&self, text: &str, dates: &[NaiveDate]) -> Option<ForecastSignal> {
        // 文本可能夹带说明文字,截取首尾花括号之间的片段
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        if end < start {
            return None;
        }

        let parsed: BTreeMap<String, f64> = serde_json::from_str(&text[start..=end]).ok()?;

        let mut multipliers = BTreeMap::new();
        for date in dates {
            let value = parsed
                .get(&date.to_string())
                .copied()
                .unwrap_or(self.default_multiplier);
            multipliers.insert(*date, value);
        }

        Some(ForecastSignal::new(multipliers, ForecastSource::Exchange))
    }
}

#[async_trait]
impl ForecastProvider for ExchangeForecastProvider {
    /// 执行有界交互并产出预测信号
    ///
    /// 每次传输调用消耗一轮;状态转移:
    /// - FinalText 且可解析 => Done
    /// - FinalText 不可解析 => 追加纠正提示,回到 Requesting
    /// - ToolCall => AwaitingToolResult, 解析工具结果后回到 Requesting
    /// - 轮数用尽 => Fallback (中性信号)
    async fn fetch(&self, location: &str, dates: &[NaiveDate]) -> Result<ForecastSignal> {
        let mut messages = vec![ChatMessage::user(self.build_prompt(location, dates))];
        let mut state = ExchangeState::Requesting;
        let mut rounds = 0u32;

        while rounds < self.max_rounds {
            rounds += 1;
            debug!(round = rounds, ?state, "预测交互轮次");

            let turn = match self.transport.send(&messages).await {
                Ok(turn) => turn,
                Err(e) => {
                    // 传输失败消耗一轮;可能是瞬时故障
                    warn!(round = rounds, error = %e, "预测传输失败");
                    continue;
                }
            };

            match turn {
                ChatTurn::FinalText(text) => {
                    if let Some(signal) = self.parse_signal(&text, dates) {
                        state = ExchangeState::Done;
                        debug!(?state, covered = signal.len(), "预测交互完成");
                        return Ok(signal);
                    }

                    // 输出不含可解析 JSON,追加纠正提示再试
                    messages.push(ChatMessage::assistant(text));
                    messages.push(ChatMessage::user(
                        "请只输出 JSON 对象, 键为日期 (YYYY-MM-DD), 值为数值乘数。",
                    ));
                    state = ExchangeState::Requesting;
                }
                ChatTurn::ToolCall { name, input } => {
                    state = ExchangeState::AwaitingToolResult;

                    let tool_result = match self.resolver.resolve(&name, &input).await {
                        Ok(result) => result,
                        Err(e) => {
                            warn!(tool = %name, error = %e, "工具执行失败");
                            format!("工具 {} 不可用", name)
                        }
                    };

                    messages.push(ChatMessage::assistant(format!(
                        "[tool_call] {} {}",
                        name, input
                    )));
                    messages.push(ChatMessage::tool(tool_result));
                    state = ExchangeState::Requesting;
                }
            }
        }

        // 轮数用尽: 回落中性信号,运行继续
        state = ExchangeState::Fallback;
        warn!(?state, max_rounds = self.max_rounds, "预测交互轮数用尽,使用中性信号");
        Ok(ForecastSignal::baseline(dates, self.default_multiplier))
    }
}
