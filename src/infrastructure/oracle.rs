//! 评审 Oracle - 基础设施层
//!
//! 只负责"把文本发给 LLM、拿回原始文本"，不关心评分格式
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ConfigError, LlmError};

/// 外部评审 oracle
///
/// 输入系统指令和用户提示，返回原始响应文本；不保证响应格式
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn judge(&self, system_instructions: &str, user_prompt: &str) -> Result<String, LlmError>;

    fn model_name(&self) -> &str;
}

/// 基于 OpenAI 兼容接口的 oracle
pub struct OpenAiOracle {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiOracle {
    /// 创建 oracle
    ///
    /// 没有 API 密钥时立即失败，之后的每次调用都不再检查凭证
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let api_key = config
            .llm_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingCredential {
                var_name: "LLM_API_KEY".to_string(),
            })?;

        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&config.llm_api_base_url);

        Ok(Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
        })
    }

    fn build_failed(&self, source: impl std::error::Error + Send + Sync + 'static) -> LlmError {
        LlmError::RequestBuildFailed {
            model: self.model_name.clone(),
            source: Box::new(source),
        }
    }
}

#[async_trait]
impl Oracle for OpenAiOracle {
    async fn judge(&self, system_instructions: &str, user_prompt: &str) -> Result<String, LlmError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_prompt.chars().count());

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_instructions)
            .build()
            .map_err(|e| self.build_failed(e))?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_prompt)
            .build()
            .map_err(|e| self.build_failed(e))?;

        let messages = vec![
            ChatCompletionRequestMessage::System(system_msg),
            ChatCompletionRequestMessage::User(user_msg),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| self.build_failed(e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            LlmError::ApiCallFailed {
                model: self.model_name.clone(),
                source: Box::new(e),
            }
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_without_credential_fails_eagerly() {
        let config = Config::default();
        match OpenAiOracle::new(&config) {
            Err(ConfigError::MissingCredential { var_name }) => assert_eq!(var_name, "LLM_API_KEY"),
            Err(other) => panic!("期望缺少凭证错误，实际: {}", other),
            Ok(_) => panic!("没有凭证时不应构造成功"),
        }
    }

    #[test]
    fn test_new_rejects_blank_credential() {
        let config = Config {
            llm_api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(OpenAiOracle::new(&config).is_err());
    }

    #[test]
    fn test_new_with_credential() {
        let config = Config {
            llm_api_key: Some("sk-test".to_string()),
            llm_model_name: "gpt-4o-mini".to_string(),
            ..Default::default()
        };
        let oracle = OpenAiOracle::new(&config).unwrap();
        assert_eq!(oracle.model_name(), "gpt-4o-mini");
    }

    /// 测试真实 API 连接性
    ///
    /// 运行方式：
    /// ```bash
    /// LLM_API_KEY=... cargo test test_live_judge -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_live_judge() {
        let _ = tracing_subscriber::fmt::try_init();

        let config = Config::from_env().expect("配置加载失败");
        let oracle = OpenAiOracle::new(&config).expect("需要设置 LLM_API_KEY");

        let response = oracle
            .judge("You are a terse assistant.", "Reply with the single word: ok")
            .await
            .expect("LLM 调用失败");
        println!("LLM 响应: {}", response);
        assert!(!response.is_empty());
    }
}
