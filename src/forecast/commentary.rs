// ==========================================
// 门店排班系统 - 评论生成协作方
// ==========================================
// 职责: 结构化数据 + 查询 -> 面向经营者的评论文本
// 红线: 单轮交互,不做工具调用
// ==========================================

use crate::forecast::{ChatMessage, ChatTransport, ChatTurn, CommentaryGenerator};
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::Arc;

// ==========================================
// TransportCommentaryGenerator - 传输背书的评论生成
// ==========================================
pub struct TransportCommentaryGenerator {
    transport: Arc<dyn ChatTransport>,
}

impl TransportCommentaryGenerator {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CommentaryGenerator for TransportCommentaryGenerator {
    /// 生成评论（单轮）
    ///
    /// 模型若请求工具视为失败,由调用方以空串顶替
    async fn summarize(&self, structured: &serde_json::Value, query: &str) -> Result<String> {
        let prompt = format!(
            "你是门店经营分析助手。以下是结构化数据:\n{data}\n\n\
             经营者问题: {query}\n\n\
             请给出不超过 200 字的简要分析: 高峰时段、建议人力配置、主要趋势。",
            data = serde_json::to_string_pretty(structured)?,
            query = query,
        );

        match self.transport.send(&[ChatMessage::user(prompt)]).await? {
            ChatTurn::FinalText(text) => Ok(text),
            ChatTurn::ToolCall { name, .. } => {
                bail!("评论生成不支持工具调用: {}", name)
            }
        }
    }
}
