// ==========================================
// 门店排班系统 - 预测层
// ==========================================
// 职责: 外部文本生成协作方的接口与交互状态机
// 红线: 核心对传输实现保持不可知;交互必须有轮数上限
// ==========================================

pub mod commentary;
pub mod exchange;
pub mod scripted;

use crate::domain::demand::ForecastSignal;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use commentary::TransportCommentaryGenerator;
pub use exchange::{ExchangeForecastProvider, ExchangeState};
pub use scripted::{ScriptedTransport, StaticWeatherResolver};

// ==========================================
// ForecastProvider Trait
// ==========================================
// 用途: 为计划窗口产出每日乘数信号
// 约定: 必须在有限轮数内返回,否则自行回落到中性信号
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// 拉取计划窗口的预测信号
    ///
    /// # 参数
    /// - location: 门店所在地
    /// - dates: 计划窗口
    async fn fetch(&self, location: &str, dates: &[NaiveDate]) -> Result<ForecastSignal>;
}

// ==========================================
// CommentaryGenerator Trait
// ==========================================
// 用途: 将结构化数据总结为面向经营者的评论文本
// 约定: 调用方捕获失败并以空串顶替,不中断运行
#[async_trait]
pub trait CommentaryGenerator: Send + Sync {
    /// 生成评论
    ///
    /// # 参数
    /// - structured: 结构化数据 (JSON)
    /// - query: 经营者查询原文
    async fn summarize(&self, structured: &serde_json::Value, query: &str) -> Result<String>;
}

// ==========================================
// ChatTransport - 文本生成传输抽象
// ==========================================

/// 会话消息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,    // "user" / "assistant" / "tool"
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }

    pub fn tool(content: impl Into<String>) -> Self {
        Self {
            role: "tool".to_string(),
            content: content.into(),
        }
    }
}

/// 一轮模型输出: 终结文本或工具调用
#[derive(Debug, Clone)]
pub enum ChatTurn {
    FinalText(String),
    ToolCall { name: String, input: serde_json::Value },
}

/// 文本生成传输接口
///
/// 实现方决定背后是哪家服务;交互状态机只依赖此接口
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, messages: &[ChatMessage]) -> Result<ChatTurn>;
}

// ==========================================
// ToolResolver - 工具结果解析接口
// ==========================================
// 交互中模型请求的工具 (如天气检索) 由实现方落地
#[async_trait]
pub trait ToolResolver: Send + Sync {
    /// 执行工具调用并返回结果文本
    async fn resolve(&self, name: &str, input: &serde_json::Value) -> Result<String>;
}
