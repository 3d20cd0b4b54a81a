// ==========================================
// 门店排班系统 - 脚本化传输与静态工具
// ==========================================
// 用途: 演示运行与测试;真实传输由部署方实现 ChatTransport
// ==========================================

use crate::forecast::{ChatMessage, ChatTransport, ChatTurn, ToolResolver};
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::Mutex;

// ==========================================
// ScriptedTransport - 脚本化文本生成传输
// ==========================================
// 按预置顺序回放模型输出;耗尽后重复最后一条
pub struct ScriptedTransport {
    turns: Vec<ChatTurn>,
    cursor: Mutex<usize>,
}

impl ScriptedTransport {
    pub fn new(turns: Vec<ChatTurn>) -> Self {
        Self {
            turns,
            cursor: Mutex::new(0),
        }
    }

    /// 每轮都返回同一条输出的变体
    pub fn repeating(turn: ChatTurn) -> Self {
        Self::new(vec![turn])
    }

    /// 无任何输出的变体 (send 恒定失败)
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn send(&self, _messages: &[ChatMessage]) -> Result<ChatTurn> {
        let mut cursor = self
            .cursor
            .lock()
            .map_err(|e| anyhow::anyhow!("锁获取失败: {}", e))?;

        if self.turns.is_empty() {
            bail!("脚本化传输无可用输出");
        }

        let index = (*cursor).min(self.turns.len() - 1);
        *cursor += 1;
        Ok(self.turns[index].clone())
    }
}

// ==========================================
// StaticWeatherResolver - 静态天气工具
// ==========================================
// 返回固定格式的天气检索结果文本
pub struct StaticWeatherResolver {
    location: String,
}

impl StaticWeatherResolver {
    pub fn new(location: &str) -> Self {
        Self {
            location: location.to_string(),
        }
    }
}

#[async_trait]
impl ToolResolver for StaticWeatherResolver {
    async fn resolve(&self, name: &str, _input: &serde_json::Value) -> Result<String> {
        if name != "web_search" {
            bail!("未知工具: {}", name);
        }

        Ok(format!(
            "Weather forecast for {}: next 7 days mostly sunny, 72-78°F. \
             Light rain expected on day 3 and day 6. No extreme weather conditions.",
            self.location
        ))
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_transport_plays_in_order() {
        let transport = ScriptedTransport::new(vec![
            ChatTurn::FinalText("first".to_string()),
            ChatTurn::FinalText("second".to_string()),
        ]);

        match transport.send(&[]).await.unwrap() {
            ChatTurn::FinalText(t) => assert_eq!(t, "first"),
            _ => panic!("期望 FinalText"),
        }
        match transport.send(&[]).await.unwrap() {
            ChatTurn::FinalText(t) => assert_eq!(t, "second"),
            _ => panic!("期望 FinalText"),
        }
        // 耗尽后重复最后一条
        match transport.send(&[]).await.unwrap() {
            ChatTurn::FinalText(t) => assert_eq!(t, "second"),
            _ => panic!("期望 FinalText"),
        }
    }

    #[tokio::test]
    async fn test_empty_transport_errors() {
        let transport = ScriptedTransport::empty();
        assert!(transport.send(&[]).await.is_err());
    }

    #[tokio::test]
    async fn test_resolver_rejects_unknown_tool() {
        let resolver = StaticWeatherResolver::new("San Diego, CA");
        assert!(resolver.resolve("sql_query", &serde_json::json!({})).await.is_err());
        assert!(resolver
            .resolve("web_search", &serde_json::json!({"query": "weather"}))
            .await
            .unwrap()
            .contains("San Diego"));
    }
}
